//! Scroll progress normalization
//!
//! Converts a geometry snapshot into a value in [0, 1]. No input, however
//! degenerate, produces NaN, a negative value or anything above 1.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::easing::clamp_unit;
use crate::geometry::GeometrySnapshot;

/// Normalized progress in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    pub const ZERO: Progress = Progress(0.0);
    pub const COMPLETE: Progress = Progress(1.0);

    /// Clamp a raw ratio into range; NaN becomes 0
    #[inline]
    pub fn new(raw: f64) -> Self {
        Progress(clamp_unit(raw))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Rounded percentage, as shown by the progress indicator
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl From<f64> for Progress {
    fn from(raw: f64) -> Progress {
        Progress::new(raw)
    }
}

impl From<Progress> for f64 {
    fn from(p: Progress) -> f64 {
        p.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// How scroll position is mapped to progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStrategy {
    /// Fraction of the scrollable page already scrolled past
    WholePage,
    /// Window from the element's top entering at the viewport bottom to its
    /// bottom leaving at the viewport top
    #[default]
    ElementRelative,
    /// How far the element's top has travelled up through one viewport
    SectionEntry,
}

impl ProgressStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStrategy::WholePage => "whole_page",
            ProgressStrategy::ElementRelative => "element_relative",
            ProgressStrategy::SectionEntry => "section_entry",
        }
    }
}

/// Compute progress for a snapshot under the given strategy
pub fn compute_progress(snapshot: &GeometrySnapshot, strategy: ProgressStrategy) -> Progress {
    match strategy {
        ProgressStrategy::WholePage => whole_page_progress(snapshot),
        ProgressStrategy::ElementRelative => element_progress(snapshot),
        ProgressStrategy::SectionEntry => section_entry_progress(snapshot),
    }
}

/// scroll_y / (document_height - viewport_height)
///
/// Zero when the document does not overflow the viewport.
pub fn whole_page_progress(snapshot: &GeometrySnapshot) -> Progress {
    let scrollable = snapshot.document_height - snapshot.viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 {
        return Progress::ZERO;
    }
    Progress::new(snapshot.scroll_y / scrollable)
}

/// (scroll_y - start) / (end - start) with start = top - viewport, end = bottom
///
/// Zero when the window is empty or inverted.
pub fn element_progress(snapshot: &GeometrySnapshot) -> Progress {
    let start = snapshot.element_top - snapshot.viewport_height;
    let end = snapshot.element_bottom;
    let total = end - start;
    if total.is_nan() || total <= 0.0 {
        return Progress::ZERO;
    }
    Progress::new((snapshot.scroll_y - start) / total)
}

/// 1 - rect_top / viewport_height, where rect_top is viewport-relative
pub fn section_entry_progress(snapshot: &GeometrySnapshot) -> Progress {
    if snapshot.viewport_height.is_nan() || snapshot.viewport_height <= 0.0 {
        return Progress::ZERO;
    }
    let rect_top = snapshot.element_rect().top;
    Progress::new(1.0 - rect_top / snapshot.viewport_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;

    fn snap(top: f64, bottom: f64, viewport: f64, document: f64, scroll: f64) -> GeometrySnapshot {
        GeometrySnapshot::new(BoundingBox::new(top, bottom), viewport, document, scroll)
    }

    #[test]
    fn test_element_relative_scenario() {
        // start = 200, end = 1400, total = 1200, raw = 300 / 1200
        let s = snap(800.0, 1400.0, 600.0, 3000.0, 500.0);
        let p = compute_progress(&s, ProgressStrategy::ElementRelative);
        assert!((p.value() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_element_relative_clamps() {
        let before = snap(800.0, 1400.0, 600.0, 3000.0, 0.0);
        assert_eq!(element_progress(&before), Progress::ZERO);
        let after = snap(800.0, 1400.0, 600.0, 3000.0, 2000.0);
        assert_eq!(element_progress(&after), Progress::COMPLETE);
    }

    #[test]
    fn test_element_relative_degenerate_window() {
        // top - viewport >= bottom means total <= 0
        let s = snap(1000.0, 100.0, 0.0, 3000.0, 500.0);
        assert_eq!(element_progress(&s), Progress::ZERO);
    }

    #[test]
    fn test_whole_page_no_scroll_room() {
        let s = snap(0.0, 600.0, 800.0, 600.0, 0.0);
        let p = whole_page_progress(&s);
        assert_eq!(p.value(), 0.0);
        assert!(!p.value().is_nan());

        let equal = snap(0.0, 800.0, 800.0, 800.0, 40.0);
        assert_eq!(whole_page_progress(&equal).value(), 0.0);
    }

    #[test]
    fn test_whole_page_midway() {
        let s = snap(0.0, 2000.0, 1000.0, 2000.0, 500.0);
        assert!((whole_page_progress(&s).value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_whole_page_overscroll_clamped() {
        let s = snap(0.0, 2000.0, 1000.0, 2000.0, 5000.0);
        assert_eq!(whole_page_progress(&s), Progress::COMPLETE);
    }

    #[test]
    fn test_section_entry() {
        // rect top = 800 - 500 = 300, 1 - 300/600 = 0.5
        let s = snap(800.0, 1400.0, 600.0, 3000.0, 500.0);
        assert!((section_entry_progress(&s).value() - 0.5).abs() < 1e-12);

        let zero_viewport = snap(800.0, 1400.0, 0.0, 3000.0, 500.0);
        assert_eq!(section_entry_progress(&zero_viewport), Progress::ZERO);
    }

    #[test]
    fn test_progress_new_handles_nan() {
        assert_eq!(Progress::new(f64::NAN), Progress::ZERO);
        assert_eq!(Progress::new(-0.5), Progress::ZERO);
        assert_eq!(Progress::new(1.5), Progress::COMPLETE);
    }

    #[test]
    fn test_percent() {
        assert_eq!(Progress::new(0.254).percent(), 25);
        assert_eq!(Progress::new(0.999).percent(), 100);
    }

    #[derive(Debug, Deserialize, Serialize)]
    struct Stored {
        p: Progress,
    }

    #[test]
    fn test_deserialize_clamps() {
        let high: Stored = toml::from_str("p = 5.0").unwrap();
        assert_eq!(high.p, Progress::COMPLETE);
        assert_eq!(high.p.percent(), 100);

        let low: Stored = toml::from_str("p = -3.0").unwrap();
        assert_eq!(low.p, Progress::ZERO);

        let mid: Stored = toml::from_str("p = 0.25").unwrap();
        assert_eq!(mid.p.value(), 0.25);
    }

    #[test]
    fn test_serializes_as_number() {
        let text = toml::to_string(&Stored { p: Progress::new(0.5) }).unwrap();
        assert_eq!(text.trim(), "p = 0.5");
    }
}
