//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`G4D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use std::time::Duration;

use gyro4d_input::{DragParams, InputMode, SensorParams};
use gyro4d_math::{Tesseract4D, ViewerDistances};
use gyro4d_render::LineStyle;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Shape and viewer configuration
    #[serde(default)]
    pub tesseract: TesseractConfig,
    /// Orientation sensor configuration
    #[serde(default)]
    pub sensor: SensorConfig,
    /// Drag and inertia configuration
    #[serde(default)]
    pub drag: DragConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`G4D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // G4D_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("G4D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Check the loaded values, returning every problem found
    ///
    /// Returns an empty vector when the configuration is usable.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let alpha = self.sensor.smoothing_alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            issues.push(ConfigIssue::SmoothingAlphaOutOfRange(alpha));
        }

        let rate = self.drag.decay_rate;
        if !(rate > 0.0 && rate < 1.0) {
            issues.push(ConfigIssue::DecayRateOutOfRange(rate));
        }

        if self.drag.tick_interval_ms == 0 {
            issues.push(ConfigIssue::ZeroTickInterval);
        }

        let threshold = self.drag.stop_threshold;
        if !(threshold > 0.0) {
            issues.push(ConfigIssue::NonPositiveStopThreshold(threshold));
        }

        let drag_values = [
            ("sensitivity", self.drag.sensitivity),
            ("velocity_blend", self.drag.velocity_blend),
            ("release_scale", self.drag.release_scale),
            ("min_move_interval_ms", self.drag.min_move_interval_ms),
        ];
        for (field, value) in drag_values {
            if !value.is_finite() {
                issues.push(ConfigIssue::NonFiniteDragValue { field, value });
            }
        }

        if !(self.tesseract.half_size > 0.0) {
            issues.push(ConfigIssue::NonPositiveHalfSize(self.tesseract.half_size));
        }

        if !(self.rendering.stroke_width > 0.0) {
            issues.push(ConfigIssue::NonPositiveStrokeWidth(self.rendering.stroke_width));
        }

        // Only meaningful once the shape itself is sane
        if self.tesseract.half_size > 0.0 {
            let extent = Tesseract4D::new(self.tesseract.half_size).planar_extent();
            let distances = self.to_viewer_distances();
            if !distances.clears_extent(extent) {
                issues.push(ConfigIssue::ViewerTooClose {
                    d4: distances.d4,
                    d3: distances.d3,
                    extent,
                });
            }
        }

        issues
    }

    /// Sensor filter parameters
    pub fn to_sensor_params(&self) -> SensorParams {
        SensorParams {
            alpha: self.sensor.smoothing_alpha,
        }
    }

    /// Drag and inertia parameters
    pub fn to_drag_params(&self) -> DragParams {
        DragParams {
            sensitivity: self.drag.sensitivity,
            velocity_blend: self.drag.velocity_blend,
            release_scale: self.drag.release_scale,
            decay_rate: self.drag.decay_rate,
            stop_threshold: self.drag.stop_threshold,
            tick_interval: Duration::from_millis(self.drag.tick_interval_ms),
            min_move_interval_ms: self.drag.min_move_interval_ms,
        }
    }

    pub fn to_viewer_distances(&self) -> ViewerDistances {
        ViewerDistances::new(
            self.tesseract.viewer_distance_4d,
            self.tesseract.viewer_distance_3d,
        )
    }

    pub fn to_line_style(&self) -> LineStyle {
        LineStyle {
            color: self.rendering.line_color,
            width: self.rendering.stroke_width,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Gyro4D - Rotating Tesseract".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Tesseract and viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseractConfig {
    /// Half the edge length
    pub half_size: f32,
    /// Viewer distance along w
    pub viewer_distance_4d: f32,
    /// Viewer distance along z
    pub viewer_distance_3d: f32,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            half_size: 100.0,
            viewer_distance_4d: 300.0,
            viewer_distance_3d: 300.0,
        }
    }
}

/// Orientation sensor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Low-pass weight of each new sample, in (0, 1]
    pub smoothing_alpha: f32,
    /// Use the cursor position as device tilt when no sensor is present
    pub tilt_emulation: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.1,
            tilt_emulation: true,
        }
    }
}

/// Drag and inertia configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Radians per pixel of drag
    pub sensitivity: f32,
    /// Weight of the newest velocity sample
    pub velocity_blend: f32,
    /// Scale applied to velocity when seeding momentum
    pub release_scale: f32,
    /// Momentum multiplier per tick
    pub decay_rate: f32,
    /// Momentum below which the coast stops
    pub stop_threshold: f32,
    /// Decay tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Floor for the time between two moves
    pub min_move_interval_ms: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.005,
            velocity_blend: 0.7,
            release_scale: 0.9,
            decay_rate: 0.999,
            stop_threshold: 1e-4,
            tick_interval_ms: 16,
            min_move_interval_ms: 1.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Angle source active at startup
    pub start_mode: InputMode,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Line color [r, g, b, a]
    pub line_color: [f32; 4],
    /// Line width in pixels
    pub stroke_width: f32,
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            line_color: [1.0, 1.0, 1.0, 1.0],
            stroke_width: 6.0,
            background_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Problem found by [`AppConfig::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    /// Smoothing alpha outside (0, 1]
    SmoothingAlphaOutOfRange(f32),
    /// Decay rate outside (0, 1)
    DecayRateOutOfRange(f32),
    /// Decay tick interval of zero
    ZeroTickInterval,
    /// Stop threshold not positive, so a coast would never end
    NonPositiveStopThreshold(f32),
    /// A drag tuning value is NaN or infinite
    NonFiniteDragValue { field: &'static str, value: f32 },
    /// Half size not positive
    NonPositiveHalfSize(f32),
    /// Stroke width not positive
    NonPositiveStrokeWidth(f32),
    /// A perspective divisor could reach zero for some rotation
    ViewerTooClose { d4: f32, d3: f32, extent: f32 },
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigIssue::SmoothingAlphaOutOfRange(a) => {
                write!(f, "sensor.smoothing_alpha {} is outside (0, 1]", a)
            }
            ConfigIssue::DecayRateOutOfRange(r) => {
                write!(f, "drag.decay_rate {} is outside (0, 1)", r)
            }
            ConfigIssue::ZeroTickInterval => write!(f, "drag.tick_interval_ms must be non-zero"),
            ConfigIssue::NonPositiveStopThreshold(t) => {
                write!(f, "drag.stop_threshold {} must be positive", t)
            }
            ConfigIssue::NonFiniteDragValue { field, value } => {
                write!(f, "drag.{} {} is not finite", field, value)
            }
            ConfigIssue::NonPositiveHalfSize(s) => {
                write!(f, "tesseract.half_size {} must be positive", s)
            }
            ConfigIssue::NonPositiveStrokeWidth(w) => {
                write!(f, "rendering.stroke_width {} must be positive", w)
            }
            ConfigIssue::ViewerTooClose { d4, d3, extent } => {
                write!(
                    f,
                    "viewer distances ({}, {}) do not clear the rotated extent {:.1}",
                    d4, d3, extent
                )
            }
        }
    }
}

impl std::error::Error for ConfigIssue {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.tesseract.half_size, 100.0);
        assert_eq!(config.input.start_mode, InputMode::Sensor);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("decay_rate"));
        assert!(toml.contains("start_mode = \"sensor\""));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("[drag]\nsensitivity = 0.01\n").unwrap();
        assert_eq!(config.drag.sensitivity, 0.01);
        assert_eq!(config.drag.decay_rate, 0.999);
        assert_eq!(config.window.width, 1280);
    }

    #[test]
    fn test_start_mode_from_toml() {
        let config: AppConfig = toml::from_str("[input]\nstart_mode = \"drag\"\n").unwrap();
        assert_eq!(config.input.start_mode, InputMode::Drag);
    }

    #[test]
    fn test_drag_params_conversion() {
        let mut config = AppConfig::default();
        config.drag.tick_interval_ms = 20;
        config.drag.sensitivity = 0.01;
        let params = config.to_drag_params();
        assert_eq!(params.tick_interval, Duration::from_millis(20));
        assert_eq!(params.sensitivity, 0.01);
        assert_eq!(params.decay_rate, 0.999);
    }

    #[test]
    fn test_line_style_conversion() {
        let style = AppConfig::default().to_line_style();
        assert_eq!(style, LineStyle::default());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = AppConfig::default();
        config.sensor.smoothing_alpha = 0.0;
        config.drag.decay_rate = 1.0;
        config.drag.tick_interval_ms = 0;
        config.rendering.stroke_width = -1.0;
        let issues = config.validate();
        assert!(issues.contains(&ConfigIssue::SmoothingAlphaOutOfRange(0.0)));
        assert!(issues.contains(&ConfigIssue::DecayRateOutOfRange(1.0)));
        assert!(issues.contains(&ConfigIssue::ZeroTickInterval));
        assert!(issues.contains(&ConfigIssue::NonPositiveStrokeWidth(-1.0)));
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn test_alpha_of_one_is_valid() {
        let mut config = AppConfig::default();
        config.sensor.smoothing_alpha = 1.0;
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_viewer_too_close() {
        let mut config = AppConfig::default();
        config.tesseract.viewer_distance_4d = 100.0;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], ConfigIssue::ViewerTooClose { .. }));
    }

    #[test]
    fn test_non_positive_half_size_skips_distance_check() {
        let mut config = AppConfig::default();
        config.tesseract.half_size = 0.0;
        assert_eq!(config.validate(), vec![ConfigIssue::NonPositiveHalfSize(0.0)]);
    }

    #[test]
    fn test_stop_threshold_must_be_positive() {
        for threshold in [0.0, -1e-4] {
            let mut config = AppConfig::default();
            config.drag.stop_threshold = threshold;
            assert_eq!(
                config.validate(),
                vec![ConfigIssue::NonPositiveStopThreshold(threshold)]
            );
        }

        let mut config = AppConfig::default();
        config.drag.stop_threshold = f32::NAN;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], ConfigIssue::NonPositiveStopThreshold(t) if t.is_nan()));
    }

    #[test]
    fn test_non_finite_drag_values() {
        let mut config = AppConfig::default();
        config.drag.sensitivity = f32::NAN;
        config.drag.release_scale = f32::INFINITY;
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            issues[0],
            ConfigIssue::NonFiniteDragValue { field: "sensitivity", value } if value.is_nan()
        ));
        assert_eq!(
            issues[1],
            ConfigIssue::NonFiniteDragValue {
                field: "release_scale",
                value: f32::INFINITY
            }
        );
    }

    #[test]
    fn test_issue_display() {
        let msg = ConfigIssue::DecayRateOutOfRange(1.5).to_string();
        assert!(msg.contains("decay_rate"));
        assert!(msg.contains("1.5"));

        let msg = ConfigIssue::NonFiniteDragValue {
            field: "sensitivity",
            value: f32::NAN,
        }
        .to_string();
        assert_eq!(msg, "drag.sensitivity NaN is not finite");
    }
}
