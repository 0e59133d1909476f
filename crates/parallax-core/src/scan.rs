//! Scripted fingerprint-scan demo
//!
//! Purely decorative: progress climbs one point per tick and the outcome at
//! 100 is a weighted coin flip. Nothing here authenticates anything.

use std::time::Duration;

use tracing::{debug, info};

use crate::animation::LoopState;
use crate::random::RandomSource;
use crate::stepper::Stepper;

/// Default tick between progress points
pub const SCAN_TICK: Duration = Duration::from_millis(30);

/// Default chance that a finished scan succeeds
pub const SUCCESS_PROBABILITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning { progress: u8 },
    Success,
    Error,
}

impl ScanState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanState::Idle => "idle",
            ScanState::Scanning { .. } => "scanning",
            ScanState::Success => "success",
            ScanState::Error => "error",
        }
    }

    /// Animation state the scan canvas should be in
    pub fn loop_state(&self) -> LoopState {
        match self {
            ScanState::Scanning { .. } => LoopState::Running,
            _ => LoopState::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Success,
    Error,
}

/// Scan demo driven by an injected random source
#[derive(Debug, Clone)]
pub struct ScanDemo<R: RandomSource> {
    state: ScanState,
    stepper: Stepper,
    success_probability: f64,
    rng: R,
}

impl<R: RandomSource> ScanDemo<R> {
    pub fn new(rng: R) -> Self {
        Self::with_settings(rng, SCAN_TICK, SUCCESS_PROBABILITY)
    }

    pub fn with_settings(rng: R, tick: Duration, success_probability: f64) -> Self {
        Self {
            state: ScanState::Idle,
            stepper: Stepper::scan(tick),
            success_probability: success_probability.clamp(0.0, 1.0),
            rng,
        }
    }

    #[inline]
    pub fn state(&self) -> ScanState {
        self.state
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        self.stepper.tick_interval()
    }

    /// Progress in percent; finished scans read 100
    pub fn progress(&self) -> u8 {
        match self.state {
            ScanState::Idle => 0,
            ScanState::Scanning { progress } => progress,
            ScanState::Success | ScanState::Error => 100,
        }
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.state, ScanState::Scanning { .. })
    }

    /// Begin a scan from zero, from any state
    pub fn start(&mut self) {
        self.stepper.reset();
        self.state = ScanState::Scanning { progress: 0 };
        debug!("Scan started");
    }

    pub fn reset(&mut self) {
        self.stepper.reset();
        self.state = ScanState::Idle;
    }

    /// Advance one tick; returns the outcome on the tick that finishes
    pub fn tick(&mut self) -> Option<ScanOutcome> {
        if !self.is_scanning() {
            return None;
        }
        if !self.stepper.advance() {
            self.state = ScanState::Scanning {
                progress: self.stepper.value() as u8,
            };
            return None;
        }

        // Success when the draw lands above the failure share
        let draw = self.rng.next_f64();
        let outcome = if draw > 1.0 - self.success_probability {
            ScanOutcome::Success
        } else {
            ScanOutcome::Error
        };
        self.state = match outcome {
            ScanOutcome::Success => ScanState::Success,
            ScanOutcome::Error => ScanState::Error,
        };
        info!(outcome = self.state.as_str(), "Scan finished");
        Some(outcome)
    }

    /// Run ticks until the scan finishes; `None` if not scanning
    pub fn run_to_completion(&mut self) -> Option<ScanOutcome> {
        while self.is_scanning() {
            if let Some(outcome) = self.tick() {
                return Some(outcome);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    #[test]
    fn test_idle_ignores_ticks() {
        let mut demo = ScanDemo::new(SequenceRandom::constant(0.9));
        assert_eq!(demo.tick(), None);
        assert_eq!(demo.state(), ScanState::Idle);
        assert_eq!(demo.progress(), 0);
    }

    #[test]
    fn test_progress_climbs_one_per_tick() {
        let mut demo = ScanDemo::new(SequenceRandom::constant(0.9));
        demo.start();
        for expected in 1..100u8 {
            assert_eq!(demo.tick(), None);
            assert_eq!(demo.progress(), expected);
        }
        assert_eq!(demo.tick(), Some(ScanOutcome::Success));
        assert_eq!(demo.state(), ScanState::Success);
        assert_eq!(demo.progress(), 100);
    }

    #[test]
    fn test_low_draw_fails() {
        let mut demo = ScanDemo::new(SequenceRandom::constant(0.1));
        demo.start();
        assert_eq!(demo.run_to_completion(), Some(ScanOutcome::Error));
        assert_eq!(demo.state(), ScanState::Error);
    }

    #[test]
    fn test_draws_around_failure_share() {
        let mut below = ScanDemo::new(SequenceRandom::constant(0.19));
        below.start();
        assert_eq!(below.run_to_completion(), Some(ScanOutcome::Error));

        let mut above = ScanDemo::new(SequenceRandom::constant(0.21));
        above.start();
        assert_eq!(above.run_to_completion(), Some(ScanOutcome::Success));
    }

    #[test]
    fn test_restart_and_reset() {
        let mut demo = ScanDemo::new(SequenceRandom::constant(0.9));
        demo.start();
        demo.run_to_completion();
        demo.start();
        assert_eq!(demo.progress(), 0);
        assert_eq!(demo.state().loop_state(), LoopState::Running);
        demo.tick();
        demo.reset();
        assert_eq!(demo.state(), ScanState::Idle);
        assert_eq!(demo.state().loop_state(), LoopState::Idle);
    }

    #[test]
    fn test_always_fail_probability() {
        let mut demo = ScanDemo::with_settings(SequenceRandom::constant(0.99), SCAN_TICK, 0.0);
        demo.start();
        assert_eq!(demo.run_to_completion(), Some(ScanOutcome::Error));
    }
}
