//! Geometry of a single mark, derived from a tool and a drag.

use crate::input::Tool;
use crate::util::{self, Point, Rect};

/// Geometry produced by one tool between two pointer positions.
///
/// Shapes carry no style: the same geometry is rendered by the live preview and
/// by the commit, only the target differs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// One incremental freehand segment (pen, highlighter, eraser)
    Segment {
        /// Segment start (the previous pointer position)
        from: Point,
        /// Segment end (the newest pointer position)
        to: Point,
    },
    /// Axis-aligned box
    Rect {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width in pixels
        w: f64,
        /// Height in pixels
        h: f64,
    },
    /// Ellipse inscribed in the drag box
    Ellipse {
        /// Center X coordinate
        cx: f64,
        /// Center Y coordinate
        cy: f64,
        /// Horizontal radius
        rx: f64,
        /// Vertical radius
        ry: f64,
    },
    /// Straight line
    Line {
        /// Press position
        from: Point,
        /// Release position
        to: Point,
    },
    /// Line with a chevron at `to`
    Arrow {
        /// Tail (press position)
        from: Point,
        /// Tip (release position)
        to: Point,
        /// Chevron arm length in pixels
        head_length: f64,
    },
    /// Crop selection box (never rasterized onto the canvas)
    Selection {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width in pixels
        w: f64,
        /// Height in pixels
        h: f64,
    },
}

impl Shape {
    /// Builds the geometry `tool` produces for a drag from `anchor` to `end`.
    pub fn from_gesture(tool: Tool, anchor: Point, end: Point, line_width: f64) -> Self {
        match tool {
            Tool::Pen | Tool::Highlighter | Tool::Eraser => Shape::Segment {
                from: anchor,
                to: end,
            },
            Tool::Rectangle => {
                let (x, y, w, h) = util::drag_box(anchor, end);
                Shape::Rect { x, y, w, h }
            }
            Tool::Circle => {
                let (x, y, w, h) = util::drag_box(anchor, end);
                let (cx, cy, rx, ry) = util::ellipse_in_box(x, y, w, h);
                Shape::Ellipse { cx, cy, rx, ry }
            }
            Tool::Line => Shape::Line {
                from: anchor,
                to: end,
            },
            Tool::Arrow => Shape::Arrow {
                from: anchor,
                to: end,
                head_length: util::arrowhead_length(line_width),
            },
            Tool::Crop => {
                let (x, y, w, h) = util::drag_box(anchor, end);
                Shape::Selection { x, y, w, h }
            }
        }
    }

    /// Returns the axis-aligned bounding box for this shape, expanded to cover stroke width.
    ///
    /// Returns `None` for the crop selection, whose overlay dims the whole view.
    pub fn bounding_box(&self, line_width: f64) -> Option<Rect> {
        let pad = stroke_padding(line_width);
        match *self {
            Shape::Segment { from, to } | Shape::Line { from, to } => {
                bounds_for_points(&[from, to], pad)
            }
            Shape::Rect { x, y, w, h } => Rect::covering(x - pad, y - pad, x + w + pad, y + h + pad),
            Shape::Ellipse { cx, cy, rx, ry } => {
                Rect::covering(cx - rx - pad, cy - ry - pad, cx + rx + pad, cy + ry + pad)
            }
            Shape::Arrow {
                from,
                to,
                head_length,
            } => {
                let [left, right] = util::calculate_arrowhead(from, to, head_length);
                bounds_for_points(&[from, to, left, right], pad)
            }
            Shape::Selection { .. } => None,
        }
    }
}

fn stroke_padding(line_width: f64) -> f64 {
    (line_width / 2.0).ceil().max(1.0)
}

fn bounds_for_points(points: &[Point], pad: f64) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let (mut min_x, mut min_y) = *first;
    let (mut max_x, mut max_y) = *first;
    for &(x, y) in rest {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    Rect::covering(min_x - pad, min_y - pad, max_x + pad, max_y + pad)
}
