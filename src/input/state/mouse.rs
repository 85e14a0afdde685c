use crate::draw::{CanvasError, Shape, Style};
use crate::input::{events::MouseButton, tool::Tool};
use crate::util::Point;
use log::debug;

use super::{DrawingState, InputState};

impl InputState {
    /// Processes a pointer button press.
    ///
    /// # Arguments
    /// * `x` - Pointer X coordinate in canvas space
    /// * `y` - Pointer Y coordinate in canvas space
    /// * `button` - Which button was pressed
    ///
    /// # Behavior
    /// A primary press while idle starts a gesture with the current tool and a
    /// snapshot of the current style. Other buttons, presses before the canvas
    /// has a buffer, and presses during a gesture are ignored.
    pub fn on_pointer_down(&mut self, x: f64, y: f64, button: MouseButton) {
        if !button.is_primary() || !self.canvas.has_surface() {
            return;
        }
        if !matches!(self.state, DrawingState::Idle) {
            return;
        }

        self.state = DrawingState::Drawing {
            tool: self.current_tool,
            style: self.current_style,
            anchor: (x, y),
            current: (x, y),
        };
        debug!("Started {:?} gesture at ({:.1}, {:.1})", self.current_tool, x, y);

        if !self.current_tool.is_freehand() {
            self.update_preview_dirty();
            self.request_repaint();
        }
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Freehand tools rasterize the segment from the previous position to
    ///   `(x, y)` straight onto the canvas, then continue from `(x, y)`
    /// - Shape tools only refresh the preview
    pub fn on_pointer_motion(&mut self, x: f64, y: f64) -> Result<(), CanvasError> {
        let DrawingState::Drawing {
            tool,
            style,
            anchor,
            current,
        } = &mut self.state
        else {
            return Ok(());
        };

        *current = (x, y);

        if tool.is_freehand() {
            let from = std::mem::replace(anchor, (x, y));
            let (tool, style) = (*tool, *style);
            self.draw_segment(tool, &style, from, (x, y))?;
        } else {
            self.update_preview_dirty();
        }

        self.request_repaint();
        Ok(())
    }

    /// Processes a pointer button release.
    ///
    /// # Behavior
    /// When the primary button is released during a gesture:
    /// - Freehand tools draw one final segment to the release point
    /// - Shape tools rasterize the shape from the press to the release point
    /// - Crop replaces the canvas with the selected region (ignored when tiny)
    ///
    /// The gesture is cleared in every case.
    pub fn on_pointer_up(&mut self, x: f64, y: f64, button: MouseButton) -> Result<(), CanvasError> {
        if !button.is_primary() {
            return Ok(());
        }

        let DrawingState::Drawing {
            tool,
            style,
            anchor,
            ..
        } = std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return Ok(());
        };

        self.clear_preview_dirty();

        if tool.is_freehand() {
            self.draw_segment(tool, &style, anchor, (x, y))?;
        } else if tool == Tool::Crop {
            if self.canvas.crop(anchor, (x, y))? {
                self.size_request = self.canvas.size();
            }
            self.dirty_tracker.mark_full();
        } else if self.canvas.commit(tool, &style, anchor, (x, y))? {
            let shape = Shape::from_gesture(tool, anchor, (x, y), style.line_width);
            self.dirty_tracker.mark_shape(&shape, style.line_width);
        }

        debug!("Finished {:?} gesture at ({:.1}, {:.1})", tool, x, y);
        self.request_repaint();
        Ok(())
    }

    /// Rasterizes one freehand segment and records its damage.
    fn draw_segment(
        &mut self,
        tool: Tool,
        style: &Style,
        from: Point,
        to: Point,
    ) -> Result<(), CanvasError> {
        if self.canvas.commit(tool, style, from, to)? {
            let segment = Shape::Segment { from, to };
            self.dirty_tracker.mark_shape(&segment, style.line_width);
        }
        Ok(())
    }
}
