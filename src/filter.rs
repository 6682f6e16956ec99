//! Moving-average smoothing for the analog inputs.
//!
//! Each channel keeps the last [`FILTER_WINDOW`] raw ADC readings in a
//! ring. Until the ring has filled, the mean only covers the readings
//! taken so far, so the first ticks after boot see a growing window.

use crate::config::{ADC_MAX, FILTER_WINDOW};

/// Fixed-capacity moving average over raw ADC readings.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalFilter<const N: usize = FILTER_WINDOW> {
    values: [u16; N],
    next: usize,
    filled: usize,
}

impl<const N: usize> SignalFilter<N> {
    pub const fn new() -> Self {
        Self {
            values: [0; N],
            next: 0,
            filled: 0,
        }
    }

    /// Record one raw reading, overwriting the oldest once the ring is full.
    ///
    /// Readings above [`ADC_MAX`] are clamped to full scale.
    pub fn sample(&mut self, raw: u16) {
        self.values[self.next] = raw.min(ADC_MAX);
        self.next = (self.next + 1) % N;
        if self.filled < N {
            self.filled += 1;
        }
    }

    /// Mean of the filled slots as a percentage of full scale.
    pub fn read_percentage(&self) -> f32 {
        if self.filled == 0 {
            return 0.0;
        }
        let sum: u32 = self.values[..self.filled].iter().map(|&v| v as u32).sum();
        let mean = sum as f32 / self.filled as f32;
        (mean / ADC_MAX as f32) * 100.0
    }

    /// Number of readings currently averaged.
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }
}

impl<const N: usize> Default for SignalFilter<N> {
    fn default() -> Self {
        Self::new()
    }
}
