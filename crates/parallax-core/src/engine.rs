//! Sample pipeline: geometry → progress → derived params
//!
//! Every entry point degrades to neutral output when geometry is missing.

use serde::Serialize;
use tracing::trace;

use crate::config::EngineConfig;
use crate::geometry::{GeometrySnapshot, ViewportProvider};
use crate::params::{DerivedVisualParams, ParamMapper};
use crate::progress::{compute_progress, whole_page_progress, Progress, ProgressStrategy};
use crate::section::{is_in_view, visible_fraction};

/// Everything derived for one section in one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionSample {
    pub progress: Progress,
    pub params: DerivedVisualParams,
    /// Fraction of the section on screen
    pub visibility: f64,
    pub in_view: bool,
}

impl SectionSample {
    pub const NEUTRAL: SectionSample = SectionSample {
        progress: Progress::ZERO,
        params: DerivedVisualParams::NEUTRAL,
        visibility: 0.0,
        in_view: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEngine {
    strategy: ProgressStrategy,
    mapper: ParamMapper,
    visibility_threshold: f64,
}

impl Default for ScrollEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ScrollEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            strategy: config.progress_strategy,
            mapper: config.mapper(),
            visibility_threshold: config.visibility_threshold,
        }
    }

    pub fn with_strategy(mut self, strategy: ProgressStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> ProgressStrategy {
        self.strategy
    }

    pub fn mapper(&self) -> &ParamMapper {
        &self.mapper
    }

    /// Whole-page progress, for the scroll indicator
    pub fn page_progress<P: ViewportProvider + ?Sized>(&self, provider: &P) -> Progress {
        whole_page_progress(&GeometrySnapshot::capture_page(provider))
    }

    /// Progress of one section under the configured strategy
    pub fn section_progress<P: ViewportProvider + ?Sized>(&self, provider: &P, element_id: &str) -> Progress {
        match GeometrySnapshot::capture(provider, element_id) {
            Some(snapshot) => self.progress_of(&snapshot),
            None => Progress::ZERO,
        }
    }

    pub fn progress_of(&self, snapshot: &GeometrySnapshot) -> Progress {
        compute_progress(snapshot, self.strategy)
    }

    /// Full sample for a section; neutral when the section is not mounted
    pub fn sample<P: ViewportProvider + ?Sized>(&self, provider: &P, element_id: &str) -> SectionSample {
        match GeometrySnapshot::capture(provider, element_id) {
            Some(snapshot) => self.sample_snapshot(&snapshot),
            None => {
                trace!(element_id, "Element not mounted, using neutral sample");
                SectionSample::NEUTRAL
            }
        }
    }

    pub fn sample_snapshot(&self, snapshot: &GeometrySnapshot) -> SectionSample {
        let progress = self.progress_of(snapshot);
        SectionSample {
            progress,
            params: self.mapper.derive(progress),
            visibility: visible_fraction(snapshot),
            in_view: is_in_view(snapshot, self.visibility_threshold),
        }
    }

    /// Visual params only
    pub fn params<P: ViewportProvider + ?Sized>(&self, provider: &P, element_id: &str) -> DerivedVisualParams {
        self.sample(provider, element_id).params
    }
}
