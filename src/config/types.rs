//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::{Color, Style};
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool and style selected when a session starts. Hosts can
/// change both at any time; a gesture in progress keeps its own copy.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool selected at startup (pen, highlighter, eraser, rectangle, circle, line, arrow, crop)
    #[serde(default)]
    pub default_tool: Tool,

    /// Default color - either a named color (red, green, blue, yellow, orange, pink, white, black)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default line width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_line_width")]
    pub default_line_width: f64,

    /// Fill rectangles and circles in addition to stroking their outline
    #[serde(default)]
    pub default_fill: bool,

    /// Multiplier applied to the color alpha (valid range: 0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub default_opacity: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: Tool::default(),
            default_color: default_color(),
            default_line_width: default_line_width(),
            default_fill: false,
            default_opacity: default_opacity(),
        }
    }
}

impl DrawingConfig {
    /// Builds the initial stroke style from these settings.
    pub fn default_style(&self) -> Style {
        Style::new(
            self.default_color.to_color(),
            self.default_line_width,
            self.default_fill,
            self.default_opacity,
        )
    }
}

/// Canvas settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Color painted under the image and on blank canvases [R, G, B, A] (0.0-1.0 range)
    #[serde(default = "default_background_color")]
    pub background_color: [f64; 4],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
        }
    }
}

impl CanvasConfig {
    pub fn background(&self) -> Color {
        Color::from_array(self.background_color)
    }
}

/// Where the headless host writes its results when no output path is given.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Directory for saved annotations (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template without extension (chrono format specifiers, e.g. `%Y-%m-%d`)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_line_width() -> f64 {
    3.0
}

fn default_opacity() -> f64 {
    1.0
}

fn default_background_color() -> [f64; 4] {
    [0.2, 0.2, 0.2, 1.0]
}

fn default_save_directory() -> String {
    "~/Pictures/Snapink".to_string()
}

fn default_filename_template() -> String {
    "annotated_%Y-%m-%d_%H%M%S".to_string()
}
