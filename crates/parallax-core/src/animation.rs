//! Lifecycle-gated animation loop
//!
//! A loop is `Idle` after mount, `Running` while frames should be produced
//! and `Stopped` once unmounted. `Stopped` is absorbing. Every frame checks
//! the current state before doing work, so a loop never outlives the
//! component that started it.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Start,
    Reset,
    Unmount,
}

impl LoopState {
    pub fn transition(self, action: LoopAction) -> LoopState {
        match (self, action) {
            (LoopState::Stopped, _) => LoopState::Stopped,
            (_, LoopAction::Unmount) => LoopState::Stopped,
            (_, LoopAction::Start) => LoopState::Running,
            (_, LoopAction::Reset) => LoopState::Idle,
        }
    }
}

/// What the frame body wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    /// Park the loop until the state changes again
    Finish,
}

/// Synchronous loop for hosts that own their frame cadence
#[derive(Debug, Clone, Default)]
pub struct AnimationLoop {
    state: LoopState,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn apply(&mut self, action: LoopAction) -> LoopState {
        let next = self.state.transition(action);
        if next != self.state {
            debug!(from = ?self.state, to = ?next, "Animation loop transition");
        }
        if action == LoopAction::Start || action == LoopAction::Reset {
            self.frames = 0;
        }
        self.state = next;
        next
    }

    pub fn start(&mut self) -> LoopState {
        self.apply(LoopAction::Start)
    }

    pub fn reset(&mut self) -> LoopState {
        self.apply(LoopAction::Reset)
    }

    pub fn unmount(&mut self) -> LoopState {
        self.apply(LoopAction::Unmount)
    }

    /// Run one frame if the loop is live
    ///
    /// Returns false without calling `body` unless the state is `Running`.
    /// A `Finish` from the body parks the loop back in `Idle`.
    pub fn frame<F>(&mut self, body: F) -> bool
    where
        F: FnOnce(u64) -> FrameControl,
    {
        if self.state != LoopState::Running {
            return false;
        }
        self.frames += 1;
        if body(self.frames) == FrameControl::Finish {
            self.state = LoopState::Idle;
        }
        true
    }
}

/// Owner side of an async loop; dropping it unmounts the loop
#[derive(Debug)]
pub struct LoopController {
    tx: watch::Sender<LoopState>,
}

impl LoopController {
    /// Create a controller and the receiver to hand to `drive`
    pub fn new() -> (Self, watch::Receiver<LoopState>) {
        let (tx, rx) = watch::channel(LoopState::Idle);
        (Self { tx }, rx)
    }

    pub fn state(&self) -> LoopState {
        *self.tx.borrow()
    }

    pub fn apply(&self, action: LoopAction) -> LoopState {
        self.tx.send_modify(|s| *s = s.transition(action));
        self.state()
    }

    pub fn start(&self) -> LoopState {
        self.apply(LoopAction::Start)
    }

    pub fn reset(&self) -> LoopState {
        self.apply(LoopAction::Reset)
    }

    pub fn unmount(&self) -> LoopState {
        self.apply(LoopAction::Unmount)
    }
}

impl Drop for LoopController {
    fn drop(&mut self) {
        self.tx.send_modify(|s| *s = LoopState::Stopped);
    }
}

/// Produce frames every `frame` while the state is `Running`
///
/// Returns the total number of frames run once the loop is stopped or its
/// controller is dropped.
pub async fn drive<F>(mut state: watch::Receiver<LoopState>, frame: Duration, mut body: F) -> u64
where
    F: FnMut(u64) -> FrameControl,
{
    let mut frames = 0u64;

    loop {
        let current = *state.borrow_and_update();
        match current {
            LoopState::Stopped => break,
            LoopState::Idle => {
                if state.changed().await.is_err() {
                    break;
                }
                continue;
            }
            LoopState::Running => {}
        }

        debug!(frame_ms = frame.as_millis() as u64, "Animation loop running");
        let mut ticker = tokio::time::interval(frame);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut run_frames = 0u64;

        loop {
            tokio::select! {
                changed = state.changed() => {
                    if changed.is_err() {
                        return frames;
                    }
                    if *state.borrow() != LoopState::Running {
                        break;
                    }
                    // Restarted while running: begin a fresh run
                    run_frames = 0;
                }
                _ = ticker.tick() => {
                    if *state.borrow() != LoopState::Running {
                        break;
                    }
                    run_frames += 1;
                    frames += 1;
                    trace!(frame = run_frames, "Animation frame");
                    if body(run_frames) == FrameControl::Finish {
                        debug!(frames = run_frames, "Animation run finished");
                        if state.changed().await.is_err() {
                            return frames;
                        }
                        break;
                    }
                }
            }
        }
    }

    debug!(frames, "Animation loop stopped");
    frames
}
