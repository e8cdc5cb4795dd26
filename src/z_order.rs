use std::cell::Cell;
use std::rc::Rc;

use crate::constants::Z_INDEX_BASE;

/// Monotonic stacking sequence shared by every window of a manager.
///
/// Clones share one counter, so the registry and anything it hands the
/// sequence to (drag grabs, focus clicks) draw from the same ordering.
#[derive(Debug, Clone)]
pub struct ZSequence {
    counter: Rc<Cell<u64>>,
}

impl Default for ZSequence {
    fn default() -> Self {
        Self::new(Z_INDEX_BASE)
    }
}

impl ZSequence {
    pub fn new(base: u64) -> Self {
        Self {
            counter: Rc::new(Cell::new(base)),
        }
    }

    /// Last value handed out (or the base when nothing was handed out yet).
    pub fn current(&self) -> u64 {
        self.counter.get()
    }

    pub fn advance(&self) -> u64 {
        let next = self.counter.get().saturating_add(1);
        self.counter.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_counter() {
        let seq = ZSequence::new(10);
        let other = seq.clone();
        assert_eq!(seq.advance(), 11);
        assert_eq!(other.advance(), 12);
        assert_eq!(seq.current(), 12);
    }

    #[test]
    fn default_starts_at_base() {
        let seq = ZSequence::default();
        assert_eq!(seq.current(), Z_INDEX_BASE);
        assert!(seq.advance() > Z_INDEX_BASE);
    }
}
