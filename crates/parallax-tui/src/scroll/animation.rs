//! Scroll animation controller
//!
//! Combines easing curves and timing helpers to ease the page offset toward
//! its target. Each frame the host calls `update()` and feeds the returned
//! row offset to the viewport provider.

use std::time::{Duration, Instant};

use parallax_core::throttle::{Clock, SystemClock};
use parallax_core::EasingType;

use super::config::{ScrollConfig, ScrollConfigExt};
use super::timing::{is_complete_at, lerp_u16, progress_at};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Animation start time
    start: Instant,
    /// Starting scroll row
    from: u16,
    /// Target scroll row
    to: u16,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
}

/// Scroll animation controller
///
/// Call `scroll_to()`/`scroll_by()` to request movement, then `update()`
/// each frame to get the current interpolated row.
#[derive(Debug, Clone)]
pub struct ScrollAnimator<C: Clock = SystemClock> {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Current scroll row (always up-to-date)
    current_scroll: u16,
    /// Pending scroll delta for batching multiple scroll events
    pending_delta: i32,
    clock: C,
}

impl Default for ScrollAnimator<SystemClock> {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator<SystemClock> {
    pub fn new(config: ScrollConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ScrollAnimator<C> {
    pub fn with_clock(config: ScrollConfig, clock: C) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0,
            pending_delta: 0,
            clock,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether there is pending work (animation or batched delta)
    ///
    /// Drives the host's choice between the fast and idle frame rate.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Final row after the current animation
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Set scroll row immediately (no animation)
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Animate to an absolute row
    ///
    /// Jumps immediately when smooth scrolling is disabled.
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.config.is_smooth() {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        let from = self.current_scroll;
        if from == target {
            self.animation = None;
            return;
        }

        self.animation = Some(self.animation_to(from, target));
    }

    /// Scroll by a delta (positive = down)
    ///
    /// Deltas arriving within one frame are batched.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.config.is_smooth() {
            let new_scroll = (self.current_scroll as i32 + delta).clamp(0, max_scroll as i32) as u16;
            self.current_scroll = new_scroll;
            self.animation = None;
            return;
        }

        self.pending_delta += delta;
    }

    pub fn scroll_down(&mut self, max_scroll: u16) {
        self.scroll_by(self.config.scroll_lines.max(1) as i32, max_scroll);
    }

    pub fn scroll_up(&mut self, max_scroll: u16) {
        self.scroll_by(-(self.config.scroll_lines.max(1) as i32), max_scroll);
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = (viewport_height / 2).max(1) as i32;
        self.scroll_by(half_page, max_scroll);
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = (viewport_height / 2).max(1) as i32;
        self.scroll_by(-half_page, max_scroll);
    }

    pub fn scroll_full_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(viewport_height as i32, max_scroll);
    }

    pub fn scroll_full_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(-(viewport_height as i32), max_scroll);
    }

    /// Advance the animation and return the current row
    pub fn update(&mut self, max_scroll: u16) -> u16 {
        let now = self.clock.now();

        if self.pending_delta != 0 {
            let target = self.target_scroll();
            let new_target = (target as i32 + self.pending_delta).clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;

            if new_target != self.current_scroll {
                self.animation = Some(self.animation_to(self.current_scroll, new_target));
            }
        }

        if let Some(ref anim) = self.animation {
            if is_complete_at(anim.start, anim.duration, now) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = progress_at(anim.start, anim.duration, now);
                let eased_t = anim.easing.apply(t);
                self.current_scroll = lerp_u16(anim.from, anim.to, eased_t).min(max_scroll);
            }
        }

        self.current_scroll
    }

    /// Cancel any active animation and stop at the current row
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }

    fn animation_to(&self, from: u16, to: u16) -> ActiveAnimation {
        ActiveAnimation {
            start: self.clock.now(),
            from,
            to,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        }
    }
}
