//! Mapping from progress to the visual parameters a renderer applies

use serde::{Deserialize, Serialize};

use crate::easing::{clamp_unit, EasingVariant};
use crate::progress::Progress;

/// Stroke length of the r=40 progress ring (2πr, rounded as drawn)
pub const RING_CIRCUMFERENCE: f64 = 251.2;

/// Per-sample output consumed by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedVisualParams {
    pub vertical_offset: f64,
    pub opacity: f64,
}

impl DerivedVisualParams {
    /// Output used whenever geometry is unavailable
    pub const NEUTRAL: DerivedVisualParams = DerivedVisualParams {
        vertical_offset: 0.0,
        opacity: 0.0,
    };
}

impl Default for DerivedVisualParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Opacity ramps in over `[0, edge]`, holds at 1, ramps out over `[1-edge, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeWindow {
    pub edge: f64,
}

impl Default for FadeWindow {
    fn default() -> Self {
        Self { edge: 0.1 }
    }
}

impl FadeWindow {
    pub fn new(edge: f64) -> Self {
        Self { edge }
    }

    pub fn opacity(&self, progress: f64) -> f64 {
        let p = clamp_unit(progress);
        if self.edge.is_nan() || self.edge <= 0.0 {
            return 1.0;
        }
        let opacity = if p < self.edge {
            p / self.edge
        } else if p > 1.0 - self.edge {
            (1.0 - p) / self.edge
        } else {
            1.0
        };
        clamp_unit(opacity)
    }
}

/// vertical_offset = base_offset - eased(progress) * travel_distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetMapping {
    pub base_offset: f64,
    pub travel_distance: f64,
}

impl Default for OffsetMapping {
    fn default() -> Self {
        Self {
            base_offset: 50.0,
            travel_distance: 100.0,
        }
    }
}

impl OffsetMapping {
    pub fn offset(&self, eased_progress: f64) -> f64 {
        self.base_offset - clamp_unit(eased_progress) * self.travel_distance
    }
}

/// Combined fade + parallax mapper
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParamMapper {
    pub fade: FadeWindow,
    pub offset: OffsetMapping,
    pub easing: EasingVariant,
}

impl ParamMapper {
    pub fn new(fade: FadeWindow, offset: OffsetMapping, easing: EasingVariant) -> Self {
        Self { fade, offset, easing }
    }

    /// Fade uses raw progress; the offset uses eased progress
    pub fn derive(&self, progress: Progress) -> DerivedVisualParams {
        let raw = progress.value();
        let eased = self.easing.apply(raw);
        DerivedVisualParams {
            vertical_offset: self.offset.offset(eased),
            opacity: self.fade.opacity(raw),
        }
    }
}

/// Derive params with the default mapper (edge 0.1, 50 - eased * 100)
pub fn derive_params(progress: f64) -> DerivedVisualParams {
    ParamMapper::default().derive(Progress::new(progress))
}

/// Dash offset of the progress ring: the undrawn part of the stroke
pub fn ring_dash_offset(progress: Progress) -> f64 {
    RING_CIRCUMFERENCE - progress.value() * RING_CIRCUMFERENCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_window_values() {
        assert!((derive_params(0.05).opacity - 0.5).abs() < 1e-9);
        assert_eq!(derive_params(0.5).opacity, 1.0);
        assert!((derive_params(0.95).opacity - 0.5).abs() < 1e-9);
        assert_eq!(derive_params(1.0).opacity, 0.0);
        assert_eq!(derive_params(0.0).opacity, 0.0);
    }

    #[test]
    fn test_fade_window_plateau_edges() {
        let fade = FadeWindow::default();
        assert!((fade.opacity(0.1) - 1.0).abs() < 1e-9);
        assert!((fade.opacity(0.9) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_mapping() {
        assert_eq!(derive_params(0.0).vertical_offset, 50.0);
        assert_eq!(derive_params(1.0).vertical_offset, -50.0);
        // quad out at 0.5 is 0.75
        assert!((derive_params(0.5).vertical_offset - (50.0 - 75.0)).abs() < 1e-9);
    }

    #[test]
    fn test_cubic_in_out_mapper() {
        let mapper = ParamMapper {
            easing: EasingVariant::CubicInOut,
            ..Default::default()
        };
        let params = mapper.derive(Progress::new(0.5));
        assert!(params.vertical_offset.abs() < 1e-9);
    }

    #[test]
    fn test_zero_edge_is_always_opaque() {
        let fade = FadeWindow::new(0.0);
        assert_eq!(fade.opacity(0.0), 1.0);
        assert_eq!(fade.opacity(1.0), 1.0);
        assert_eq!(FadeWindow::new(f64::NAN).opacity(0.05), 1.0);
        assert_eq!(FadeWindow::new(-0.1).opacity(0.05), 1.0);
    }

    #[test]
    fn test_ring_dash_offset() {
        assert_eq!(ring_dash_offset(Progress::ZERO), RING_CIRCUMFERENCE);
        assert_eq!(ring_dash_offset(Progress::COMPLETE), 0.0);
        assert!((ring_dash_offset(Progress::new(0.5)) - 125.6).abs() < 1e-9);
    }
}
