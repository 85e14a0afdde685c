//! Drawing state machine and input state management.

use crate::config::Config;
use crate::draw::{Canvas, CanvasError, Color, DirtyTracker, PixelBuffer, Shape, Style};
use crate::input::tool::Tool;
use crate::util::{Point, Rect};

/// Current gesture state machine.
///
/// Tracks whether the user is idle or holding the primary button down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawingState {
    /// Not actively drawing - waiting for a primary button press
    Idle,
    /// Primary button held down
    Drawing {
        /// Tool captured when the gesture started
        tool: Tool,
        /// Style captured when the gesture started
        style: Style,
        /// Press position for shapes; previous pointer position for freehand
        anchor: Point,
        /// Latest pointer position
        current: Point,
    },
}

/// Main input state containing the whole annotation session.
///
/// Owns the canvas, the tool and style selected for the next gesture, and the
/// gesture in progress. Hosts feed it pointer events, watch `needs_redraw`,
/// and call [`InputState::paint`] when they repaint.
pub struct InputState {
    /// Permanent raster layer (image plus committed marks)
    pub canvas: Canvas,
    /// Tool used by the next gesture
    pub current_tool: Tool,
    /// Style used by the next gesture
    pub current_style: Style,
    /// Current gesture state machine
    pub state: DrawingState,
    /// Whether the host should repaint (coalescible)
    pub needs_redraw: bool,
    /// Size the host should request for its widget, once an image or crop set one
    pub(crate) size_request: Option<(i32, i32)>,
    /// Tracks dirty regions between repaints
    pub(crate) dirty_tracker: DirtyTracker,
    /// Cached bounds for the current preview shape (if any)
    pub(crate) last_preview_bounds: Option<Rect>,
}

impl InputState {
    /// Creates a new InputState with no canvas buffer yet.
    ///
    /// The buffer appears once the host loads an image or reports its
    /// allocated size (see [`InputState::on_size_allocate`]).
    ///
    /// # Arguments
    /// * `tool` - Initially selected tool
    /// * `style` - Initial stroke style
    /// * `background` - Opaque color painted under the image
    pub fn with_defaults(tool: Tool, style: Style, background: Color) -> Self {
        Self {
            canvas: Canvas::new(background),
            current_tool: tool,
            current_style: style,
            state: DrawingState::Idle,
            needs_redraw: true,
            size_request: None,
            dirty_tracker: DirtyTracker::new(),
            last_preview_bounds: None,
        }
    }

    /// Creates an InputState from the user's drawing and canvas settings.
    pub fn from_config(config: &Config) -> Self {
        Self::with_defaults(
            config.drawing.default_tool,
            config.drawing.default_style(),
            config.canvas.background(),
        )
    }

    /// Signals the host that the view is stale.
    ///
    /// Requests are coalescible: several calls before the next repaint need
    /// only one repaint.
    pub fn request_repaint(&mut self) {
        self.needs_redraw = true;
    }

    /// Returns true while the primary button is held.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Selects the tool for the next gesture. A gesture in progress keeps its own tool.
    pub fn select_tool(&mut self, tool: Tool) {
        if self.current_tool != tool {
            log::debug!("Tool changed to {:?}", tool);
        }
        self.current_tool = tool;
    }

    /// Replaces the style for the next gesture.
    pub fn set_style(&mut self, style: Style) {
        self.current_style = style;
    }

    pub fn set_color(&mut self, color: Color) {
        self.current_style.color = color;
    }

    pub fn set_line_width(&mut self, line_width: f64) {
        self.current_style.line_width = line_width;
    }

    pub fn set_fill(&mut self, fill: bool) {
        self.current_style.fill = fill;
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.current_style.opacity = opacity;
    }

    /// Loads a new base image, discarding every committed mark.
    ///
    /// The canvas adopts the image size, which then takes precedence over any
    /// size the host allocates. `None` forgets the stored image only.
    pub fn load_image(&mut self, image: Option<PixelBuffer>) -> Result<(), CanvasError> {
        let size = image.as_ref().map(|image| (image.width, image.height));
        self.canvas.load_image(image)?;

        if let Some(size) = size {
            self.size_request = Some(size);
            self.state = DrawingState::Idle;
            self.last_preview_bounds = None;
            self.dirty_tracker.mark_full();
            self.request_repaint();
        }
        Ok(())
    }

    /// Handles the host's widget size allocation.
    ///
    /// Until an image or crop has fixed the canvas size, the canvas follows the
    /// allocation (reallocating and redrawing when the size changes). Afterwards
    /// the allocation is ignored so a late or repeated allocation can never
    /// wipe the image.
    pub fn on_size_allocate(&mut self, width: i32, height: i32) -> Result<(), CanvasError> {
        if self.size_request.is_some() {
            log::debug!(
                "Ignoring {}x{} allocation; canvas size is set by its image",
                width,
                height
            );
            return Ok(());
        }

        if self.canvas.resize_or_create(width, height)? {
            self.canvas.redraw()?;
            self.dirty_tracker.mark_full();
            self.request_repaint();
        }
        Ok(())
    }

    /// Size the host should request for its widget, if the engine has one.
    pub fn preferred_size(&self) -> Option<(i32, i32)> {
        self.size_request
    }

    /// Abandons the gesture in progress without finalizing it.
    ///
    /// Freehand segments already rasterized stay on the canvas.
    pub fn cancel_gesture(&mut self) {
        if self.is_drawing() {
            self.state = DrawingState::Idle;
            self.clear_preview_dirty();
            self.request_repaint();
        }
    }

    /// Returns the composited result, or the untouched source image if no
    /// buffer was ever allocated.
    pub fn export(&self) -> Result<Option<PixelBuffer>, CanvasError> {
        self.canvas.export()
    }

    /// Drains pending dirty rectangles for the current canvas size.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let (width, height) = self.canvas.size().unwrap_or((0, 0));
        self.dirty_tracker.take_regions(width, height)
    }

    /// Returns the preview geometry for a shape-family gesture in progress.
    pub fn preview_shape(&self) -> Option<(Tool, Style, Shape)> {
        match self.state {
            DrawingState::Drawing {
                tool,
                style,
                anchor,
                current,
            } if !tool.is_freehand() => Some((
                tool,
                style,
                Shape::from_gesture(tool, anchor, current, style.line_width),
            )),
            _ => None,
        }
    }

    /// Clears any cached preview bounds and marks their damage region.
    pub(crate) fn clear_preview_dirty(&mut self) {
        if let Some(prev) = self.last_preview_bounds.take() {
            self.dirty_tracker.mark_rect(prev);
        }
    }

    /// Updates tracked preview bounds for dirty-region purposes.
    pub(crate) fn update_preview_dirty(&mut self) {
        let Some((_, style, shape)) = self.preview_shape() else {
            self.clear_preview_dirty();
            return;
        };

        match shape.bounding_box(style.line_width) {
            Some(bounds) => {
                if self.last_preview_bounds != Some(bounds) {
                    self.clear_preview_dirty();
                }
                self.dirty_tracker.mark_rect(bounds);
                self.last_preview_bounds = Some(bounds);
            }
            None => {
                self.last_preview_bounds = None;
                self.dirty_tracker.mark_full();
            }
        }
    }
}
