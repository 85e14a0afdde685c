//! Cairo-based rendering functions for strokes and shapes.
//!
//! Every function here is a pure function of its inputs and the target
//! context. The live preview and the permanent commit call the same entry
//! point, [`render_mark`], so a committed shape matches the last preview drawn
//! at the same pointer position.

use super::color::{BLACK, Color, WHITE};
use super::shape::Shape;
use super::style::Style;
use crate::input::Tool;
use crate::util::{self, Point};
use std::f64::consts::PI;

/// Alpha of the dimming layer drawn outside a crop selection.
const CROP_DIM_ALPHA: f64 = 0.5;

/// Dash pattern of the crop selection border.
const CROP_DASH: [f64; 2] = [4.0, 4.0];

/// Renders the mark `tool` produces for a drag from `anchor` to `end`.
///
/// Freehand tools draw one segment, shape tools draw the whole shape, and the
/// crop tool draws its selection overlay. Context state (source, operator,
/// line settings) is saved and restored around the call.
pub fn render_mark(
    ctx: &cairo::Context,
    tool: Tool,
    style: &Style,
    anchor: Point,
    end: Point,
) -> Result<(), cairo::Error> {
    let shape = Shape::from_gesture(tool, anchor, end, style.line_width);
    render_shape(ctx, tool, &shape, style)
}

/// Renders precomputed geometry with the compositing rules of `tool`.
pub fn render_shape(
    ctx: &cairo::Context,
    tool: Tool,
    shape: &Shape,
    style: &Style,
) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.new_path();

    let result = match *shape {
        Shape::Segment { from, to } => render_segment(ctx, tool, style, from, to),
        Shape::Rect { x, y, w, h } => render_rect(ctx, style, x, y, w, h),
        Shape::Ellipse { cx, cy, rx, ry } => render_ellipse(ctx, style, cx, cy, rx, ry),
        Shape::Line { from, to } => render_line(ctx, style, from, to),
        Shape::Arrow {
            from,
            to,
            head_length,
        } => render_arrow(ctx, style, from, to, head_length),
        Shape::Selection { x, y, w, h } => render_crop_overlay(ctx, x, y, w, h),
    };

    ctx.restore()?;
    result
}

/// Replaces the whole target with a background color.
///
/// Uses the source operator, so nothing previously on the target shows through.
pub fn render_background(ctx: &cairo::Context, color: Color) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    color.apply_to(ctx);
    let result = ctx.paint();
    ctx.restore()?;
    result
}

/// Sets source color, width, round caps and round joins.
fn apply_stroke_style(ctx: &cairo::Context, color: Color, line_width: f64) {
    color.apply_to(ctx);
    ctx.set_line_width(line_width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
}

/// Render one freehand segment (pen, highlighter or eraser)
fn render_segment(
    ctx: &cairo::Context,
    tool: Tool,
    style: &Style,
    from: Point,
    to: Point,
) -> Result<(), cairo::Error> {
    match tool {
        Tool::Highlighter => apply_stroke_style(ctx, style.highlighter_color(), style.line_width),
        Tool::Eraser => {
            apply_stroke_style(ctx, BLACK, style.line_width);
            ctx.set_operator(cairo::Operator::Clear);
        }
        _ => apply_stroke_style(ctx, style.effective_color(), style.line_width),
    }

    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    let result = ctx.stroke();

    // The clear operator must never outlive the eraser stroke.
    ctx.set_operator(cairo::Operator::Over);
    result
}

/// Render a rectangle, filled first when the style asks for it
fn render_rect(
    ctx: &cairo::Context,
    style: &Style,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) -> Result<(), cairo::Error> {
    apply_stroke_style(ctx, style.effective_color(), style.line_width);
    ctx.rectangle(x, y, w, h);
    fill_then_stroke(ctx, style.fill)
}

/// Render an ellipse using Cairo's arc with scaling
fn render_ellipse(
    ctx: &cairo::Context,
    style: &Style,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
) -> Result<(), cairo::Error> {
    // A zero scale would put the context into an invalid-matrix error state.
    if rx <= 0.0 || ry <= 0.0 {
        return Ok(());
    }

    apply_stroke_style(ctx, style.effective_color(), style.line_width);

    ctx.save()?;
    ctx.translate(cx, cy);
    ctx.scale(rx, ry);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    ctx.restore()?;

    fill_then_stroke(ctx, style.fill)
}

/// Fills the current path (keeping it) when requested, then strokes it.
fn fill_then_stroke(ctx: &cairo::Context, fill: bool) -> Result<(), cairo::Error> {
    if fill {
        ctx.fill_preserve()?;
    }
    ctx.stroke()
}

/// Render a straight line
fn render_line(
    ctx: &cairo::Context,
    style: &Style,
    from: Point,
    to: Point,
) -> Result<(), cairo::Error> {
    apply_stroke_style(ctx, style.effective_color(), style.line_width);
    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    ctx.stroke()
}

/// Render an arrow (line with a chevron at the end point)
fn render_arrow(
    ctx: &cairo::Context,
    style: &Style,
    from: Point,
    to: Point,
    head_length: f64,
) -> Result<(), cairo::Error> {
    render_line(ctx, style, from, to)?;

    let [left, right] = util::calculate_arrowhead(from, to, head_length);
    ctx.move_to(to.0, to.1);
    ctx.line_to(left.0, left.1);
    ctx.move_to(to.0, to.1);
    ctx.line_to(right.0, right.1);
    ctx.stroke()
}

/// Renders the crop selection overlay.
///
/// Dims everything, punches the selection back out, and outlines it with a
/// dashed white border. The overlay is built in its own group so the punched
/// hole reveals whatever the target already shows instead of erasing it.
pub fn render_crop_overlay(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) -> Result<(), cairo::Error> {
    ctx.push_group();

    ctx.set_source_rgba(0.0, 0.0, 0.0, CROP_DIM_ALPHA);
    ctx.paint()?;

    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(0.0, 0.0, 0.0, 0.0);
    ctx.rectangle(x, y, w, h);
    ctx.fill()?;
    ctx.set_operator(cairo::Operator::Over);

    WHITE.apply_to(ctx);
    ctx.set_line_width(1.0);
    ctx.set_dash(&CROP_DASH, 0.0);
    ctx.rectangle(x, y, w, h);
    ctx.stroke()?;

    ctx.pop_group_to_source()?;
    ctx.paint()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{CANVAS_GRAY, RED};

    fn transparent_surface(width: i32, height: i32) -> cairo::ImageSurface {
        cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap()
    }

    fn alpha_at(surface: &mut cairo::ImageSurface, x: i32, y: i32) -> u8 {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y as usize * stride + x as usize * 4;
        let pixel = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        (pixel >> 24) as u8
    }

    #[test]
    fn highlighter_alpha_is_fixed_fraction_of_opacity() {
        for (style_alpha, opacity) in [(1.0, 1.0), (0.2, 1.0), (1.0, 0.5), (0.0, 0.25)] {
            let mut surface = transparent_surface(40, 40);
            {
                let ctx = cairo::Context::new(&surface).unwrap();
                let style = Style::new(RED.with_alpha(style_alpha), 10.0, false, opacity);
                render_mark(&ctx, Tool::Highlighter, &style, (5.0, 20.0), (35.0, 20.0)).unwrap();
            }
            let expected = (0.4 * opacity * 255.0_f64).round() as i32;
            let actual = alpha_at(&mut surface, 20, 20) as i32;
            assert!(
                (actual - expected).abs() <= 1,
                "alpha {actual} != {expected} (style alpha {style_alpha}, opacity {opacity})"
            );
        }
    }

    #[test]
    fn eraser_clears_and_restores_operator() {
        let mut surface = transparent_surface(40, 40);
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            render_background(&ctx, CANVAS_GRAY).unwrap();
            let style = Style::new(RED, 6.0, false, 1.0);
            render_mark(&ctx, Tool::Eraser, &style, (0.0, 20.0), (40.0, 20.0)).unwrap();
            assert_eq!(ctx.operator(), cairo::Operator::Over);
        }
        assert_eq!(alpha_at(&mut surface, 20, 20), 0);
        assert_eq!(alpha_at(&mut surface, 20, 5), 255);
    }

    #[test]
    fn zero_size_circle_leaves_context_usable() {
        let mut surface = transparent_surface(20, 20);
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            let style = Style::default();
            render_mark(&ctx, Tool::Circle, &style, (10.0, 10.0), (10.0, 10.0)).unwrap();
            render_mark(&ctx, Tool::Line, &style, (0.0, 10.0), (20.0, 10.0)).unwrap();
        }
        assert_eq!(alpha_at(&mut surface, 10, 10), 255);
    }

    #[test]
    fn filled_rectangle_covers_interior() {
        let mut surface = transparent_surface(60, 60);
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            let style = Style::new(RED, 2.0, true, 1.0);
            render_mark(&ctx, Tool::Rectangle, &style, (10.0, 10.0), (50.0, 50.0)).unwrap();
        }
        assert_eq!(alpha_at(&mut surface, 30, 30), 255);
        assert_eq!(alpha_at(&mut surface, 5, 5), 0);
    }

    #[test]
    fn crop_overlay_dims_outside_and_keeps_selection_clear() {
        let mut surface = transparent_surface(60, 60);
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            render_mark(
                &ctx,
                Tool::Crop,
                &Style::default(),
                (10.0, 10.0),
                (50.0, 50.0),
            )
            .unwrap();
        }
        assert_eq!(alpha_at(&mut surface, 30, 30), 0);
        let dimmed = alpha_at(&mut surface, 2, 2) as i32;
        assert!((dimmed - 128).abs() <= 1);
    }
}
