//! Smooth scrolling for the demo page
//!
//! ## Atoms
//! - `timing` - progress and interpolation helpers
//! - `config` - `ScrollConfig` helpers (the type lives in parallax-core)
//!
//! ## Controller
//! - `animation` - `ScrollAnimator`, which eases the page scroll offset
//!
//! Easing curves come from `parallax_core::easing`.

pub mod config;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
