use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::easing::{EasingType, EasingVariant};
use crate::params::{FadeWindow, OffsetMapping, ParamMapper};
use crate::progress::ProgressStrategy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here while the TUI runs)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Scroll sampling and parallax mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Throttle window in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Fraction of a section that must be on screen to count as active
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
    /// Easing applied to progress before computing the offset
    #[serde(default)]
    pub easing_variant: EasingVariant,
    /// How section progress is measured
    #[serde(default)]
    pub progress_strategy: ProgressStrategy,
    /// Width of the fade-in and fade-out ramps, in progress units
    #[serde(default = "default_fade_edge")]
    pub fade_edge: f64,
    /// Offset at progress 0
    #[serde(default = "default_base_offset")]
    pub base_offset: f64,
    /// Offset travelled between progress 0 and 1
    #[serde(default = "default_travel_distance")]
    pub travel_distance: f64,
    /// Distance from the viewport top of the line that picks the active section
    #[serde(default = "default_active_probe_offset")]
    pub active_probe_offset: f64,
    /// Scroll offset beyond which the page counts as scrolled
    #[serde(default = "default_scrolled_threshold")]
    pub scrolled_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            visibility_threshold: default_visibility_threshold(),
            easing_variant: EasingVariant::default(),
            progress_strategy: ProgressStrategy::default(),
            fade_edge: default_fade_edge(),
            base_offset: default_base_offset(),
            travel_distance: default_travel_distance(),
            active_probe_offset: default_active_probe_offset(),
            scrolled_threshold: default_scrolled_threshold(),
        }
    }
}

impl EngineConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn mapper(&self) -> ParamMapper {
        ParamMapper::new(
            FadeWindow::new(self.fade_edge),
            OffsetMapping {
                base_offset: self.base_offset,
                travel_distance: self.travel_distance,
            },
            self.easing_variant,
        )
    }
}

/// Smooth scrolling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable animated scrolling
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve
    #[serde(default)]
    pub easing: EasingType,
    /// Lines per scroll step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while an animation is in flight
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Decorative demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Milliseconds per scan progress point
    #[serde(default = "default_scan_tick")]
    pub scan_tick_ms: u64,
    /// Chance that a finished scan succeeds
    #[serde(default = "default_success_probability")]
    pub success_probability: f64,
    /// Particles on the scan canvas
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
    /// Fixed seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            scan_tick_ms: default_scan_tick(),
            success_probability: default_success_probability(),
            particle_count: default_particle_count(),
            seed: None,
        }
    }
}

impl DemoConfig {
    pub fn scan_tick(&self) -> Duration {
        Duration::from_millis(self.scan_tick_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parallax")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_interval_ms() -> u64 {
    16 // ~60Hz
}

fn default_visibility_threshold() -> f64 {
    0.2
}

fn default_fade_edge() -> f64 {
    0.1
}

fn default_base_offset() -> f64 {
    50.0
}

fn default_travel_distance() -> f64 {
    100.0
}

fn default_active_probe_offset() -> f64 {
    100.0
}

fn default_scrolled_threshold() -> f64 {
    10.0
}

fn default_animation_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_scan_tick() -> u64 {
    30
}

fn default_success_probability() -> f64 {
    0.8
}

fn default_particle_count() -> usize {
    100
}

fn default_tick_rate() -> u64 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if absent
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let engine = &self.engine;
        if engine.interval_ms == 0 {
            return Err(invalid("engine.interval_ms", "must be greater than 0"));
        }
        if !(engine.visibility_threshold > 0.0 && engine.visibility_threshold <= 1.0) {
            return Err(invalid(
                "engine.visibility_threshold",
                format!("{} is outside (0, 1]", engine.visibility_threshold),
            ));
        }
        if !(engine.fade_edge > 0.0 && engine.fade_edge <= 0.5) {
            return Err(invalid(
                "engine.fade_edge",
                format!("{} is outside (0, 0.5]", engine.fade_edge),
            ));
        }
        if !engine.base_offset.is_finite() || !engine.travel_distance.is_finite() {
            return Err(invalid("engine.base_offset", "offsets must be finite"));
        }
        if !(0.0..=1.0).contains(&self.demo.success_probability) {
            return Err(invalid(
                "demo.success_probability",
                format!("{} is outside [0, 1]", self.demo.success_probability),
            ));
        }
        if self.demo.scan_tick_ms == 0 {
            return Err(invalid("demo.scan_tick_ms", "must be greater than 0"));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/parallax/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("parallax")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("parallax.log")
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::Error {
    crate::Error::InvalidOption {
        field,
        reason: reason.into(),
    }
}
