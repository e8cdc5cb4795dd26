//! Document-scoped listener bookkeeping.
//!
//! Drags, resizes and keyboard traps listen on the whole screen rather than
//! on the window that started them, so a drag keeps tracking after the
//! pointer leaves the window. Those registrations must not outlive the
//! interaction: a `ListenerScope` is the only handle to a registration and
//! dropping it removes the registration, on every exit path.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
    KeyDown,
}

#[derive(Debug, Clone)]
struct Registration {
    owner: String,
    kind: ListenerKind,
}

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    active: BTreeMap<u64, Registration>,
}

#[derive(Debug, Clone, Default)]
pub struct GlobalListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl GlobalListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `owner` for each of `kinds` until the returned scope drops.
    pub fn acquire(&self, owner: &str, kinds: &[ListenerKind]) -> ListenerScope {
        let mut table = self.table.borrow_mut();
        let mut ids = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let id = table.next_id;
            table.next_id += 1;
            table.active.insert(
                id,
                Registration {
                    owner: owner.to_string(),
                    kind: *kind,
                },
            );
            ids.push(id);
        }
        tracing::trace!(owner, ?kinds, "listeners acquired");
        ListenerScope {
            table: Rc::downgrade(&self.table),
            owner: owner.to_string(),
            ids,
        }
    }

    pub fn active_count(&self) -> usize {
        self.table.borrow().active.len()
    }

    pub fn is_listening(&self, owner: &str, kind: ListenerKind) -> bool {
        self.table
            .borrow()
            .active
            .values()
            .any(|reg| reg.owner == owner && reg.kind == kind)
    }

    /// Owners registered for `kind`, oldest registration first.
    pub fn owners_of(&self, kind: ListenerKind) -> Vec<String> {
        let mut owners: Vec<String> = Vec::new();
        for reg in self.table.borrow().active.values() {
            if reg.kind == kind && !owners.contains(&reg.owner) {
                owners.push(reg.owner.clone());
            }
        }
        owners
    }
}

/// Live registration handle. Not `Clone`: exactly one scope releases.
#[derive(Debug)]
pub struct ListenerScope {
    table: Weak<RefCell<ListenerTable>>,
    owner: String,
    ids: Vec<u64>,
}

impl ListenerScope {
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl Drop for ListenerScope {
    fn drop(&mut self) {
        let Some(table) = self.table.upgrade() else {
            return;
        };
        let mut table = table.borrow_mut();
        for id in &self.ids {
            table.active.remove(id);
        }
        tracing::trace!(owner = %self.owner, "listeners released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_releases_on_drop() {
        let listeners = GlobalListeners::new();
        let scope = listeners.acquire("color", &[ListenerKind::PointerMove, ListenerKind::PointerUp]);
        assert_eq!(listeners.active_count(), 2);
        assert!(listeners.is_listening("color", ListenerKind::PointerUp));
        assert!(!listeners.is_listening("color", ListenerKind::KeyDown));
        drop(scope);
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn owners_are_reported_once_in_registration_order() {
        let listeners = GlobalListeners::new();
        let _a = listeners.acquire("a", &[ListenerKind::KeyDown]);
        let _b = listeners.acquire("b", &[ListenerKind::KeyDown, ListenerKind::PointerUp]);
        let _a2 = listeners.acquire("a", &[ListenerKind::KeyDown]);
        assert_eq!(listeners.owners_of(ListenerKind::KeyDown), vec!["a", "b"]);
        assert_eq!(listeners.owners_of(ListenerKind::PointerUp), vec!["b"]);
    }

    #[test]
    fn scope_outliving_table_is_harmless() {
        let listeners = GlobalListeners::new();
        let scope = listeners.acquire("x", &[ListenerKind::PointerMove]);
        drop(listeners);
        assert_eq!(scope.owner(), "x");
        drop(scope);
    }
}
