use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Largest tick range accepted by [`RulerConfig::validate`]; one descriptor is built per tick
pub const MAX_TICK_COUNT: usize = 1_000_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ruler: RulerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval in milliseconds when idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a snap is pending or animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Terminal columns drawn per tick
    #[serde(default = "default_columns_per_tick")]
    pub columns_per_tick: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            columns_per_tick: default_columns_per_tick(),
        }
    }
}

impl UiConfig {
    pub fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }
}

/// Easing curve applied to the snap animation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    #[default]
    Linear,
    Cubic,
    Quintic,
    EaseOut,
    Smoothstep,
}

/// Which edge of the major tick a label is attached to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAlignment {
    Top,
    #[default]
    Bottom,
}

/// Line geometry and colours per tick category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickStyle {
    #[serde(default = "default_major_height")]
    pub major_height: f64,
    #[serde(default = "default_minor_height")]
    pub minor_height: f64,
    #[serde(default = "default_major_thickness")]
    pub major_thickness: f64,
    #[serde(default = "default_minor_thickness")]
    pub minor_thickness: f64,
    #[serde(default = "default_major_color")]
    pub major_color: String,
    #[serde(default = "default_minor_color")]
    pub minor_color: String,
    #[serde(default = "default_matched_color")]
    pub matched_color: String,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            major_height: default_major_height(),
            minor_height: default_minor_height(),
            major_thickness: default_major_thickness(),
            minor_thickness: default_minor_thickness(),
            major_color: default_major_color(),
            minor_color: default_minor_color(),
            matched_color: default_matched_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    /// Label minor ticks as well as major ones
    #[serde(default)]
    pub show_sub_labels: bool,
    /// Gap between the major tick extent and the label
    #[serde(default = "default_label_spacing")]
    pub spacing: f64,
    #[serde(default)]
    pub rotation_degrees: f64,
    #[serde(default)]
    pub alignment: LabelAlignment,
    #[serde(default = "default_label_color")]
    pub color: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            show_sub_labels: false,
            spacing: default_label_spacing(),
            rotation_degrees: 0.0,
            alignment: LabelAlignment::default(),
            color: default_label_color(),
        }
    }
}

/// Ruler configuration
///
/// Immutable for the lifetime of a session. Call [`RulerConfig::validate`]
/// (done by [`crate::ScrollSession::new`]) before using the mapping helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulerConfig {
    #[serde(default = "default_min_value")]
    pub min_value: i64,
    #[serde(default = "default_max_value")]
    pub max_value: i64,
    /// Major tick every `interval` ticks
    #[serde(default = "default_interval")]
    pub interval: i64,
    /// Sub-steps per whole value
    #[serde(default = "default_smaller_interval")]
    pub smaller_interval: i64,
    /// Pixels between adjacent integer ticks
    #[serde(default = "default_tick_spacing")]
    pub tick_spacing: f64,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default = "default_initial_value")]
    pub initial_value: i64,
    #[serde(default = "default_true")]
    pub snapping: bool,
    #[serde(default = "default_snap_debounce")]
    pub snap_debounce_ms: u64,
    #[serde(default = "default_snap_animation_duration")]
    pub snap_animation_duration_ms: u64,
    #[serde(default)]
    pub snap_animation_curve: EasingType,
    /// Values drawn with the matched colour
    #[serde(default)]
    pub match_values: Vec<i64>,
    /// Overrides for the generated labels, in tick order
    #[serde(default)]
    pub custom_labels: Option<Vec<String>>,
    #[serde(default)]
    pub tick_style: TickStyle,
    #[serde(default)]
    pub label_style: LabelStyle,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            min_value: default_min_value(),
            max_value: default_max_value(),
            interval: default_interval(),
            smaller_interval: default_smaller_interval(),
            tick_spacing: default_tick_spacing(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            initial_value: default_initial_value(),
            snapping: default_true(),
            snap_debounce_ms: default_snap_debounce(),
            snap_animation_duration_ms: default_snap_animation_duration(),
            snap_animation_curve: EasingType::default(),
            match_values: Vec::new(),
            custom_labels: None,
            tick_style: TickStyle::default(),
            label_style: LabelStyle::default(),
        }
    }
}

impl RulerConfig {
    /// Reject configurations the mapper cannot represent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_value >= self.max_value {
            return Err(ConfigError::InvalidRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.tick_count() > MAX_TICK_COUNT {
            return Err(ConfigError::RangeTooLarge {
                min: self.min_value,
                max: self.max_value,
                limit: MAX_TICK_COUNT,
            });
        }
        if self.interval <= 0 {
            return Err(ConfigError::NonPositiveInterval(self.interval));
        }
        if self.smaller_interval <= 0 {
            return Err(ConfigError::NonPositiveSmallerInterval(self.smaller_interval));
        }
        if !self.tick_spacing.is_finite() || self.tick_spacing <= 0.0 {
            return Err(ConfigError::NonPositiveTickSpacing(self.tick_spacing));
        }
        if !self.contains(self.initial_value) {
            return Err(ConfigError::InitialValueOutOfRange {
                value: self.initial_value,
                min: self.min_value,
                max: self.max_value,
            });
        }
        if let Some(&value) = self.match_values.iter().find(|v| !self.contains(**v)) {
            return Err(ConfigError::MatchValueOutOfRange {
                value,
                min: self.min_value,
                max: self.max_value,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }

    /// Number of integer ticks, `max_value - min_value + 1`, saturating at `usize::MAX`
    #[inline]
    pub fn tick_count(&self) -> usize {
        let count = (self.max_value as i128 - self.min_value as i128 + 1).max(0);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    #[inline]
    pub fn snap_debounce(&self) -> Duration {
        Duration::from_millis(self.snap_debounce_ms)
    }

    #[inline]
    pub fn snap_animation_duration(&self) -> Duration {
        Duration::from_millis(self.snap_animation_duration_ms)
    }

    #[inline]
    pub fn is_matched(&self, value: i64) -> bool {
        self.match_values.contains(&value)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_columns_per_tick() -> u16 {
    2
}

fn default_min_value() -> i64 {
    0
}

fn default_max_value() -> i64 {
    100
}

fn default_interval() -> i64 {
    10
}

fn default_smaller_interval() -> i64 {
    1
}

fn default_tick_spacing() -> f64 {
    20.0
}

fn default_viewport_width() -> f64 {
    400.0
}

fn default_viewport_height() -> f64 {
    80.0
}

fn default_initial_value() -> i64 {
    0
}

fn default_snap_debounce() -> u64 {
    100
}

fn default_snap_animation_duration() -> u64 {
    200
}

fn default_major_height() -> f64 {
    40.0
}

fn default_minor_height() -> f64 {
    20.0
}

fn default_major_thickness() -> f64 {
    2.0
}

fn default_minor_thickness() -> f64 {
    1.0
}

fn default_major_color() -> String {
    "#d4be98".to_string()
}

fn default_minor_color() -> String {
    "#7c6f64".to_string()
}

fn default_matched_color() -> String {
    "#a9b665".to_string()
}

fn default_label_spacing() -> f64 {
    4.0
}

fn default_label_color() -> String {
    "#a89984".to_string()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::ConfigParse(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml_string()?)?;

        Ok(())
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::ConfigParse(e.to_string()))
    }

    /// Always ~/.config/tickruler/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("tickruler")
            .join("config.toml")
    }
}
