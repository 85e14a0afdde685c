//! Configuration file support for snapink.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/snapink/config.toml`. Settings include drawing defaults,
//! the canvas background, and where annotated images are saved.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, OutputConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Valid range for `drawing.default_line_width`.
const LINE_WIDTH_RANGE: (f64, f64) = (1.0, 50.0);

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "arrow"
/// default_color = "red"
/// default_line_width = 3.0
/// default_fill = false
/// default_opacity = 1.0
///
/// [canvas]
/// background_color = [0.2, 0.2, 0.2, 1.0]
///
/// [output]
/// save_directory = "~/Pictures/Snapink"
/// filename_template = "annotated_%Y-%m-%d_%H%M%S"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Initial tool and stroke style
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Canvas appearance
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Default output location
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_line_width`: 1.0 - 50.0
    /// - `default_opacity`: 0.0 - 1.0
    /// - `background_color` components: 0.0 - 1.0, alpha forced to 1.0
    pub fn validate_and_clamp(&mut self) {
        let (min_width, max_width) = LINE_WIDTH_RANGE;
        if !(min_width..=max_width).contains(&self.drawing.default_line_width) {
            log::warn!(
                "Invalid default_line_width {:.1}, clamping to {:.1}-{:.1} range",
                self.drawing.default_line_width,
                min_width,
                max_width
            );
            self.drawing.default_line_width = if self.drawing.default_line_width.is_nan() {
                min_width
            } else {
                self.drawing.default_line_width.clamp(min_width, max_width)
            };
        }

        if !(0.0..=1.0).contains(&self.drawing.default_opacity) {
            log::warn!(
                "Invalid default_opacity {:.2}, clamping to 0.0-1.0 range",
                self.drawing.default_opacity
            );
            self.drawing.default_opacity = if self.drawing.default_opacity.is_nan() {
                1.0
            } else {
                self.drawing.default_opacity.clamp(0.0, 1.0)
            };
        }

        for (i, component) in self.canvas.background_color.iter_mut().enumerate() {
            if !(0.0..=1.0).contains(component) {
                log::warn!(
                    "Invalid background_color[{}] = {:.3}, clamping to 0.0-1.0",
                    i,
                    component
                );
                *component = if component.is_nan() {
                    1.0
                } else {
                    component.clamp(0.0, 1.0)
                };
            }
        }

        // The canvas background must be opaque.
        if self.canvas.background_color[3] != 1.0 {
            log::warn!(
                "background_color alpha {:.3} is not opaque, using 1.0",
                self.canvas.background_color[3]
            );
            self.canvas.background_color[3] = 1.0;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/snapink/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("snapink");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error. All loaded values
    /// are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Returns the JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
