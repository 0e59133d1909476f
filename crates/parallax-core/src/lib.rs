//! Scroll-synchronized animation engine
//!
//! Samples scroll position through an injected [`ViewportProvider`],
//! normalizes it to progress in [0, 1], eases it, and maps it to the
//! opacity/offset pairs a renderer applies to decorative content.

pub mod animation;
pub mod config;
pub mod detail;
pub mod easing;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod listener;
pub mod params;
pub mod particles;
pub mod progress;
pub mod random;
pub mod scan;
pub mod section;
pub mod stepper;
pub mod throttle;

pub use config::{AppConfig, DemoConfig, EngineConfig, ScrollConfig};
pub use easing::{EasingType, EasingVariant};
pub use engine::{ScrollEngine, SectionSample};
pub use error::{Error, Result};
pub use geometry::{BoundingBox, GeometrySnapshot, StaticViewport, ViewportProvider};
pub use params::{derive_params, DerivedVisualParams};
pub use progress::{compute_progress, Progress, ProgressStrategy};
pub use throttle::{throttle, Throttle};
