//! Spawn cadences
//!
//! The reference timers (500 ms auto-fire, 2000 ms object drops) are modeled
//! as tick counters inside the simulation so tests can step time
//! deterministically. Both cadences advance only while the game is Running;
//! the tick loop enforces that gate for both identically.

/// A fixed-period recurring trigger, advanced once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    interval: u32,
    elapsed: u32,
}

impl Cadence {
    pub fn new(interval: u32) -> Self {
        debug_assert!(interval > 0);
        Self {
            interval,
            elapsed: 0,
        }
    }

    /// Advance one tick; returns true when the period elapses and wraps
    pub fn advance(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.interval {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    /// Restart the period from zero
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }
}
