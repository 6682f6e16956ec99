//! Monotonic millisecond clock abstraction.
//!
//! Every "wait" in the controller is an elapsed-time comparison against a
//! [`Millis`] read once per tick, so tests drive time by hand.

/// Point in time, in milliseconds since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u64);

impl Millis {
    /// Milliseconds elapsed since `earlier` (zero if `earlier` is in the future).
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Whole seconds elapsed since `earlier`.
    pub fn secs_since(self, earlier: Millis) -> u64 {
        self.since(earlier) / 1000
    }
}

/// Trait for abstracting time sources.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Millis;
}
