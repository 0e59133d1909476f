//! Fixed-step progress counters driven by a periodic tick

use std::time::Duration;

/// Counter that advances by `step` each tick, saturating at `max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stepper {
    value: u32,
    step: u32,
    max: u32,
    tick: Duration,
}

impl Stepper {
    pub fn new(step: u32, max: u32, tick: Duration) -> Self {
        Self {
            value: 0,
            step,
            max,
            tick,
        }
    }

    /// Loading indicator: +5 every 100ms up to 100
    pub fn loading() -> Self {
        Self::new(5, 100, Duration::from_millis(100))
    }

    /// Scan progress: +1 per tick up to 100
    pub fn scan(tick: Duration) -> Self {
        Self::new(1, 100, tick)
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        self.tick
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.value >= self.max
    }

    /// Fraction of `max` reached, in [0, 1]
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            return 1.0;
        }
        (self.value as f64 / self.max as f64).min(1.0)
    }

    /// Advance one tick; returns true on the tick that completes
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.value = self.value.saturating_add(self.step).min(self.max);
        self.is_complete()
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}
