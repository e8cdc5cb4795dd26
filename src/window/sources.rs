//! Injectable time and randomness for window placement and ids.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::layout::Point;

pub trait Clock {
    fn now_millis(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// Clock frozen at a settable instant.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: Cell<u64>,
}

impl FixedClock {
    pub fn new(now: u64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: u64) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

pub trait JitterSource {
    /// Offset with each axis in `-spread..=spread`.
    fn jitter(&mut self, spread: i32) -> Point;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn jitter(&mut self, _spread: i32) -> Point {
        Point::default()
    }
}

#[derive(Debug)]
pub struct RandomJitter {
    rng: ThreadRng,
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self { rng: rand::rng() }
    }
}

impl JitterSource for RandomJitter {
    fn jitter(&mut self, spread: i32) -> Point {
        if spread <= 0 {
            return Point::default();
        }
        Point::new(
            self.rng.random_range(-spread..=spread),
            self.rng.random_range(-spread..=spread),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_jitter_stays_in_range() {
        let mut jitter = RandomJitter::default();
        for _ in 0..200 {
            let p = jitter.jitter(40);
            assert!((-40..=40).contains(&p.x));
            assert!((-40..=40).contains(&p.y));
        }
        assert_eq!(jitter.jitter(0), Point::default());
    }

    #[test]
    fn fixed_clock_reports_what_was_set() {
        let clock = FixedClock::new(5);
        assert_eq!(clock.now_millis(), 5);
        clock.set(9);
        assert_eq!(clock.now_millis(), 9);
        assert!(SystemClock.now_millis() > 0);
    }
}
