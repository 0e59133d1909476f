//! Pure easing functions
//!
//! Every curve maps [0, 1] onto [0, 1], is continuous and non-decreasing.
//! Inputs are clamped before evaluation so callers never hit the
//! out-of-range branches of the polynomials.

use serde::{Deserialize, Serialize};

/// Easing curve selected for scroll-driven parallax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingVariant {
    /// f(x) = 1 - (1-x)²
    #[default]
    QuadraticOut,
    /// Cubic ease-in-out, symmetric around (0.5, 0.5)
    CubicInOut,
}

impl EasingVariant {
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            EasingVariant::QuadraticOut => ease_quad_out(x),
            EasingVariant::CubicInOut => ease_cubic_in_out(x),
        }
    }
}

impl From<EasingVariant> for EasingType {
    fn from(variant: EasingVariant) -> Self {
        match variant {
            EasingVariant::QuadraticOut => EasingType::QuadraticOut,
            EasingVariant::CubicInOut => EasingType::CubicInOut,
        }
    }
}

/// Easing curve for smooth scroll animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump straight to the target at the end of the animation
    None,
    Linear,
    QuadraticOut,
    /// Cubic ease-out
    #[default]
    Cubic,
    CubicInOut,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

impl EasingType {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value, clamped to [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = clamp_unit(t);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::QuadraticOut => ease_quad_out(t),
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::CubicInOut => ease_cubic_in_out(t),
            EasingType::Quintic => quintic_ease_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
        }
    }
}

/// Clamp to [0, 1], mapping NaN to 0
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Quadratic ease-out: f(x) = 1 - (1-x)²
#[inline]
pub fn ease_quad_out(x: f64) -> f64 {
    let inv = 1.0 - clamp_unit(x);
    1.0 - inv * inv
}

/// Cubic ease-in-out: 4x³ below the midpoint, 1 - (-2x+2)³/2 above it
#[inline]
pub fn ease_cubic_in_out(x: f64) -> f64 {
    let x = clamp_unit(x);
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        let k = -2.0 * x + 2.0;
        1.0 - k * k * k / 2.0
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}
