use crate::draw::{CanvasError, render_shape};

use super::InputState;

impl InputState {
    /// Paints the current view onto a host-supplied Cairo context.
    ///
    /// Composites the permanent canvas first, then the preview of the shape
    /// being dragged, recomputed from the live gesture on every call.
    pub fn paint(&self, ctx: &cairo::Context) -> Result<(), CanvasError> {
        self.canvas.paint_onto(ctx)?;
        if self.render_preview(ctx)? {
            log::trace!("Rendered preview shape");
        }
        Ok(())
    }

    /// Renders the preview of a shape-family gesture in progress.
    ///
    /// # Returns
    /// `true` if a preview was rendered, `false` when idle or drawing freehand
    /// (freehand segments are already on the canvas).
    pub fn render_preview(&self, ctx: &cairo::Context) -> Result<bool, CanvasError> {
        match self.preview_shape() {
            Some((tool, style, shape)) => {
                render_shape(ctx, tool, &shape, &style)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
