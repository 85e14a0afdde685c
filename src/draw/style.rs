//! Stroke style snapshot.

use super::color::{Color, RED};

/// Alpha used by the highlighter before the opacity multiplier is applied.
pub const HIGHLIGHTER_ALPHA: f64 = 0.4;

/// Appearance of a stroke or shape.
///
/// A gesture copies the style when it starts, so later changes only affect the
/// next gesture. `opacity` scales the color's alpha at draw time and never
/// mutates `color` itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Stroke (and fill) color
    pub color: Color,
    /// Stroke width in pixels
    pub line_width: f64,
    /// Whether rectangles and circles are filled before stroking
    pub fill: bool,
    /// Opacity multiplier in 0.0-1.0
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: RED,
            line_width: 3.0,
            fill: false,
            opacity: 1.0,
        }
    }
}

impl Style {
    pub fn new(color: Color, line_width: f64, fill: bool, opacity: f64) -> Self {
        Self {
            color,
            line_width,
            fill,
            opacity,
        }
    }

    /// Color actually sent to Cairo for pens and shapes.
    pub fn effective_color(&self) -> Color {
        self.color.with_alpha(self.color.a * self.opacity)
    }

    /// Color used by the highlighter: the style's own alpha is ignored.
    pub fn highlighter_color(&self) -> Color {
        self.color.with_alpha(HIGHLIGHTER_ALPHA * self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_scales_alpha_without_touching_color() {
        let style = Style::new(Color::new(0.0, 0.0, 1.0, 0.5), 2.0, false, 0.5);
        assert_eq!(style.effective_color().a, 0.25);
        assert_eq!(style.color.a, 0.5);
    }

    #[test]
    fn highlighter_ignores_style_alpha() {
        let style = Style::new(Color::new(1.0, 1.0, 0.0, 0.1), 8.0, false, 0.5);
        assert!((style.highlighter_color().a - 0.2).abs() < 1e-12);
    }
}
