//! Section visibility and active-section detection

use tracing::debug;

use crate::geometry::{GeometrySnapshot, ViewportProvider};

/// Fraction of the element currently inside the viewport, in [0, 1]
pub fn visible_fraction(snapshot: &GeometrySnapshot) -> f64 {
    if snapshot.element_height.is_nan() || snapshot.element_height <= 0.0 {
        return 0.0;
    }
    let view_top = snapshot.scroll_y;
    let view_bottom = snapshot.scroll_y + snapshot.viewport_height;
    let overlap = snapshot.element_bottom.min(view_bottom) - snapshot.element_top.max(view_top);
    (overlap.max(0.0) / snapshot.element_height).min(1.0)
}

/// Whether at least `threshold` of the element is on screen
pub fn is_in_view(snapshot: &GeometrySnapshot, threshold: f64) -> bool {
    let fraction = visible_fraction(snapshot);
    fraction > 0.0 && fraction >= threshold
}

/// Tracks a section's in-view flag across samples
#[derive(Debug, Clone)]
pub struct InViewTracker {
    threshold: f64,
    /// Latch the flag after the first entry
    once: bool,
    in_view: bool,
}

impl InViewTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            once: false,
            in_view: false,
        }
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    #[inline]
    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Feed one sample; `None` (unmounted) counts as out of view
    ///
    /// Returns true when the flag changed.
    pub fn update(&mut self, snapshot: Option<&GeometrySnapshot>) -> bool {
        if self.once && self.in_view {
            return false;
        }
        let now = snapshot.map(|s| is_in_view(s, self.threshold)).unwrap_or(false);
        let changed = now != self.in_view;
        self.in_view = now;
        changed
    }
}

/// First section, in the given order, whose viewport rect spans `probe`
pub fn active_section<'a, P>(provider: &P, section_ids: &[&'a str], probe: f64) -> Option<&'a str>
where
    P: ViewportProvider + ?Sized,
{
    let scroll_y = provider.current_scroll_y();
    section_ids.iter().copied().find(|id| {
        provider
            .bounding_box_of(id)
            .map(|bbox| {
                let rect = bbox.relative_to(scroll_y);
                rect.top <= probe && rect.bottom >= probe
            })
            .unwrap_or(false)
    })
}

/// Navigation bar state derived from scroll position
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavState {
    pub scrolled: bool,
    pub active: Option<String>,
}

/// Recomputes `NavState` on each scroll sample
#[derive(Debug, Clone)]
pub struct NavTracker {
    sections: Vec<String>,
    probe_offset: f64,
    scrolled_threshold: f64,
    state: NavState,
}

impl NavTracker {
    pub fn new(sections: Vec<String>, probe_offset: f64, scrolled_threshold: f64) -> Self {
        Self {
            sections,
            probe_offset,
            scrolled_threshold,
            state: NavState::default(),
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Returns true when the state changed
    ///
    /// The active section keeps its previous value when no section spans the
    /// probe line.
    pub fn update<P: ViewportProvider + ?Sized>(&mut self, provider: &P) -> bool {
        let scrolled = provider.current_scroll_y() > self.scrolled_threshold;
        let ids: Vec<&str> = self.sections.iter().map(String::as_str).collect();
        let active = active_section(provider, &ids, self.probe_offset)
            .map(str::to_string)
            .or_else(|| self.state.active.clone());

        let next = NavState { scrolled, active };
        if next != self.state {
            debug!(scrolled = next.scrolled, active = ?next.active, "Navigation state changed");
            self.state = next;
            true
        } else {
            false
        }
    }
}
