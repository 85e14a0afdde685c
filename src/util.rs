//! Utility functions for colors and annotation geometry.
//!
//! This module provides:
//! - Color name mapping for configuration and scripts
//! - Drag-box normalization shared by rectangle, circle and crop
//! - Arrowhead geometry
//! - Integer rectangles for damage tracking

use crate::draw::{Color, color::*};
use std::f64::consts::PI;

/// A point in surface-local coordinates.
pub type Point = (f64, f64);

/// Half-angle between the arrow shaft and each chevron arm.
pub const ARROW_HALF_ANGLE: f64 = PI / 6.0;

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Length of each chevron arm for a given stroke width.
pub fn arrowhead_length(line_width: f64) -> f64 {
    10.0 + line_width * 2.0
}

/// Calculates the two chevron arm endpoints for an arrow drawn from `from` to `to`.
///
/// The chevron sits at `to` and opens back towards `from`. The shaft direction
/// is `atan2(dy, dx)`, so a zero-length arrow still gets a chevron pointing
/// along the positive x axis.
///
/// # Returns
/// Array of two points `[left, right]`, each joined to `to` by one arm.
pub fn calculate_arrowhead(from: Point, to: Point, length: f64) -> [Point; 2] {
    let (x1, y1) = from;
    let (x2, y2) = to;
    let angle = (y2 - y1).atan2(x2 - x1);

    let left = (
        x2 - length * (angle - ARROW_HALF_ANGLE).cos(),
        y2 - length * (angle - ARROW_HALF_ANGLE).sin(),
    );
    let right = (
        x2 - length * (angle + ARROW_HALF_ANGLE).cos(),
        y2 - length * (angle + ARROW_HALF_ANGLE).sin(),
    );

    [left, right]
}

// ============================================================================
// Drag Geometry
// ============================================================================

/// Normalizes a drag from `anchor` to `end` into an axis-aligned box.
///
/// Returns `(x, y, width, height)` with the origin at the minimum corner, so
/// dragging in any direction yields the same box.
pub fn drag_box(anchor: Point, end: Point) -> (f64, f64, f64, f64) {
    let x = anchor.0.min(end.0);
    let y = anchor.1.min(end.1);
    let w = (anchor.0 - end.0).abs();
    let h = (anchor.1 - end.1).abs();
    (x, y, w, h)
}

/// Calculates the ellipse inscribed in a box.
///
/// # Returns
/// Tuple `(cx, cy, rx, ry)` of the box center and half extents.
pub fn ellipse_in_box(x: f64, y: f64, w: f64, h: f64) -> (f64, f64, f64, f64) {
    (x + w / 2.0, y + h / 2.0, w / 2.0, h / 2.0)
}

/// Integer crop region for a drag, truncating every component toward zero.
///
/// Returns `(x, y, width, height)`.
pub fn crop_region(anchor: Point, end: Point) -> (i32, i32, i32, i32) {
    let (x, y, w, h) = drag_box(anchor, end);
    (x as i32, y as i32, w as i32, h as i32)
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and gesture scripts.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

// ============================================================================
// Damage Rectangles
// ============================================================================

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(
            min_x,
            min_y,
            max_x.saturating_sub(min_x),
            max_y.saturating_sub(min_y),
        )
    }

    /// Builds the smallest integer rectangle covering floating-point bounds.
    ///
    /// Degenerate bounds are widened to one pixel so a zero-size mark still
    /// produces damage.
    pub fn covering(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Self> {
        let min_x = min_x.floor() as i32;
        let min_y = min_y.floor() as i32;
        let max_x = (max_x.ceil() as i32).max(min_x.saturating_add(1));
        let max_y = (max_y.ceil() as i32).max(min_y.saturating_add(1));
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrowhead_arms_have_expected_length_and_angle() {
        let length = arrowhead_length(3.0);
        assert_eq!(length, 16.0);

        let [left, right] = calculate_arrowhead((0.0, 0.0), (100.0, 0.0), length);
        for (px, py) in [left, right] {
            let arm = ((100.0 - px).powi(2) + py.powi(2)).sqrt();
            assert!((arm - 16.0).abs() < 1e-9);
            assert!(px < 100.0);
        }
        // Arms mirror each other about the shaft.
        assert!((left.1 + right.1).abs() < 1e-9);
        assert!((left.1.abs() - 16.0 * ARROW_HALF_ANGLE.sin()).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_follows_shaft_direction() {
        let [left, right] = calculate_arrowhead((50.0, 50.0), (50.0, 10.0), 10.0);
        // Shaft points up, so both arms trail below the tip.
        assert!(left.1 > 10.0);
        assert!(right.1 > 10.0);
    }

    #[test]
    fn drag_box_normalizes_any_direction() {
        assert_eq!(drag_box((50.0, 40.0), (10.0, 90.0)), (10.0, 40.0, 40.0, 50.0));
        assert_eq!(drag_box((10.0, 40.0), (50.0, 90.0)), (10.0, 40.0, 40.0, 50.0));
    }

    #[test]
    fn ellipse_in_box_uses_center_and_half_extents() {
        assert_eq!(ellipse_in_box(0.0, 0.0, 10.0, 4.0), (5.0, 2.0, 5.0, 2.0));
    }

    #[test]
    fn crop_region_truncates() {
        assert_eq!(crop_region((5.7, 9.2), (30.9, 40.1)), (5, 9, 25, 30));
    }

    #[test]
    fn covering_rect_widens_degenerate_bounds() {
        let rect = Rect::covering(4.5, 4.5, 4.5, 4.5).unwrap();
        assert_eq!(rect, Rect::new(4, 4, 1, 1).unwrap());
    }

    #[test]
    fn covering_rect_saturates_far_off_bounds() {
        let rect = Rect::covering(-3.0e9, 8.0, 12.0, 12.0).unwrap();
        assert_eq!(rect.x, i32::MIN);
        assert_eq!(rect.width, i32::MAX);
        assert_eq!(rect.height, 4);

        // No room for a pixel past i32::MAX; no rectangle, no panic.
        assert!(Rect::covering(f64::MAX, 0.0, f64::MAX, 1.0).is_none());
    }

    #[test]
    fn name_color_mapping() {
        assert_eq!(name_to_color("White").unwrap(), WHITE);
        assert!(name_to_color("chartreuse").is_none());
    }
}
