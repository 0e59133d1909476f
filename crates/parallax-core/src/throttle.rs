//! Leading-edge event sampler
//!
//! The first call in a quiet period runs immediately and arms a timer for
//! `interval`. Calls landing while the timer is pending are dropped, not
//! queued: there is no trailing-edge flush, so the last event of a burst can
//! go unsampled until the next event arrives. The pending timer is released
//! by `cancel` and on drop.

use std::cell::Cell;
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::trace;

/// Default sampling window, ~60 Hz
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);

/// Monotonic time source
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by `std::time::Instant`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that follows tokio's timer, so paused-time tests control it
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    #[inline]
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Hand-advanced clock; clones share the same time
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

/// Timer armed by an accepted call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub fires_at: Instant,
}

/// Suppression bookkeeping for one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThrottleState {
    pub is_suppressed: bool,
    pub pending_timer: Option<PendingTimer>,
}

impl ThrottleState {
    /// Fire the pending timer if its deadline has passed
    fn fire_due(&mut self, now: Instant) {
        if let Some(timer) = self.pending_timer {
            if now >= timer.fires_at {
                self.pending_timer = None;
                self.is_suppressed = false;
            }
        }
    }

    fn clear(&mut self) {
        self.pending_timer = None;
        self.is_suppressed = false;
    }
}

/// Rate-limited wrapper around a callback taking `A`
pub struct Throttle<A, F, C = SystemClock>
where
    F: FnMut(A),
    C: Clock,
{
    callback: F,
    interval: Duration,
    clock: C,
    state: ThrottleState,
    invoked: u64,
    dropped: u64,
    _arg: PhantomData<fn(A)>,
}

/// Wrap `callback` so it runs at most once per `interval`
pub fn throttle<A, F: FnMut(A)>(callback: F, interval: Duration) -> Throttle<A, F, SystemClock> {
    Throttle::with_clock(callback, interval, SystemClock)
}

impl<A, F, C> Throttle<A, F, C>
where
    F: FnMut(A),
    C: Clock,
{
    pub fn with_clock(callback: F, interval: Duration, clock: C) -> Self {
        Self {
            callback,
            interval,
            clock,
            state: ThrottleState::default(),
            invoked: 0,
            dropped: 0,
            _arg: PhantomData,
        }
    }

    /// Offer a call; returns whether the callback ran
    pub fn call(&mut self, arg: A) -> bool {
        let now = self.clock.now();
        self.state.fire_due(now);

        if self.state.is_suppressed {
            self.dropped += 1;
            trace!(dropped = self.dropped, "Throttled call dropped");
            return false;
        }

        (self.callback)(arg);
        self.invoked += 1;

        if !self.interval.is_zero() {
            self.state.is_suppressed = true;
            self.state.pending_timer = Some(PendingTimer {
                fires_at: now + self.interval,
            });
        }
        true
    }

    /// Cancel the pending timer and lift suppression
    pub fn cancel(&mut self) {
        if self.state.pending_timer.is_some() {
            trace!("Throttle timer cancelled");
        }
        self.state.clear();
    }

    /// Current state with any due timer applied
    pub fn state(&mut self) -> ThrottleState {
        let now = self.clock.now();
        self.state.fire_due(now);
        self.state
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of calls forwarded to the callback
    #[inline]
    pub fn invoked(&self) -> u64 {
        self.invoked
    }

    /// Number of calls dropped inside a suppression window
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl<A, F, C> Drop for Throttle<A, F, C>
where
    F: FnMut(A),
    C: Clock,
{
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(clock: &ManualClock, interval_ms: u64) -> (Rc<Cell<u32>>, impl FnMut(()) -> bool) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut t = Throttle::with_clock(
            move |_: ()| c.set(c.get() + 1),
            Duration::from_millis(interval_ms),
            clock.clone(),
        );
        (count, move |_| t.call(()))
    }

    #[test]
    fn test_burst_invokes_once_then_again_after_window() {
        let clock = ManualClock::new();
        let (count, mut call) = counting(&clock, 16);

        // 10 calls spread over 5ms
        for i in 0..10 {
            if i > 0 && i % 2 == 0 {
                clock.advance(Duration::from_millis(1));
            }
            call(());
        }
        assert!(clock.elapsed() <= Duration::from_millis(5));
        assert_eq!(count.get(), 1);

        clock.advance(Duration::from_millis(20) - clock.elapsed());
        assert!(call(()));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_dropped_calls_are_not_replayed() {
        let clock = ManualClock::new();
        let (count, mut call) = counting(&clock, 16);

        call(());
        call(());
        call(());
        clock.advance(Duration::from_millis(100));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let clock = ManualClock::new();
        let (count, mut call) = counting(&clock, 16);

        call(());
        clock.advance(Duration::from_millis(15));
        assert!(!call(()));
        clock.advance(Duration::from_millis(1));
        assert!(call(()));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_state_and_cancel() {
        let clock = ManualClock::new();
        let mut t = Throttle::with_clock(|_: u32| {}, Duration::from_millis(16), clock.clone());

        assert_eq!(t.state(), ThrottleState::default());
        t.call(1);
        let state = t.state();
        assert!(state.is_suppressed);
        assert!(state.pending_timer.is_some());

        t.cancel();
        assert_eq!(t.state(), ThrottleState::default());
        assert!(t.call(2));
        assert_eq!(t.invoked(), 2);
    }

    #[test]
    fn test_counters() {
        let clock = ManualClock::new();
        let mut t = Throttle::with_clock(|_: ()| {}, Duration::from_millis(16), clock);
        for _ in 0..5 {
            t.call(());
        }
        assert_eq!(t.invoked(), 1);
        assert_eq!(t.dropped(), 4);
    }

    #[test]
    fn test_zero_interval_never_suppresses() {
        let mut t = throttle(|_: ()| {}, Duration::ZERO);
        assert!(t.call(()));
        assert!(t.call(()));
        assert!(!t.state().is_suppressed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_follows_paused_time() {
        let mut t = Throttle::with_clock(|_: ()| {}, DEFAULT_INTERVAL, TokioClock);
        assert!(t.call(()));
        assert!(!t.call(()));
        tokio::time::advance(Duration::from_millis(20)).await;
        assert!(t.call(()));
    }
}
