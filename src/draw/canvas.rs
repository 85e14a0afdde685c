//! The permanent raster layer.

use super::color::{CANVAS_GRAY, Color};
use super::error::CanvasError;
use super::pixels::PixelBuffer;
use super::render::{render_background, render_mark};
use super::style::Style;
use crate::input::Tool;
use crate::util::{self, Point};
use log::{debug, info};

/// Crops narrower or shorter than this are treated as accidental clicks.
pub const MIN_CROP_SIZE: i32 = 10;

/// Backing buffer holding the source image plus every committed mark.
///
/// Marks are rasterized straight into the buffer; there is no retained list of
/// strokes. The only way to discard a mark is to replace the whole buffer,
/// which happens on image load and crop.
pub struct Canvas {
    /// Backing buffer (absent until the host sizes the canvas or loads an image)
    surface: Option<cairo::ImageSurface>,
    /// Source image exactly as the host supplied it
    source: Option<PixelBuffer>,
    /// Premultiplied copy of `source`, painted on every redraw
    source_surface: Option<cairo::ImageSurface>,
    /// Opaque color painted before the image
    background: Color,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CANVAS_GRAY)
    }
}

impl Canvas {
    /// Creates an empty canvas with no backing buffer.
    ///
    /// The background's alpha is ignored; the canvas is always backed by an
    /// opaque color.
    pub fn new(background: Color) -> Self {
        Self {
            surface: None,
            source: None,
            source_surface: None,
            background: background.with_alpha(1.0),
        }
    }

    /// Returns true once a backing buffer exists.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Returns true while a source image is loaded.
    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Dimensions of the backing buffer, if any.
    pub fn size(&self) -> Option<(i32, i32)> {
        self.surface
            .as_ref()
            .map(|surface| (surface.width(), surface.height()))
    }

    /// Allocates a new buffer when none exists or the size differs.
    ///
    /// New buffers are painted with the opaque background so translucent
    /// images never show uninitialized memory. Returns `true` if a buffer was
    /// allocated. Non-positive sizes are ignored.
    pub fn resize_or_create(&mut self, width: i32, height: i32) -> Result<bool, CanvasError> {
        if width <= 0 || height <= 0 {
            debug!("Ignoring canvas size {}x{}", width, height);
            return Ok(false);
        }
        if self.size() == Some((width, height)) {
            return Ok(false);
        }

        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        {
            let ctx = cairo::Context::new(&surface)?;
            render_background(&ctx, self.background)?;
        }
        self.surface = Some(surface);

        debug!("Allocated {}x{} canvas", width, height);
        Ok(true)
    }

    /// Repaints the background and then the source image.
    ///
    /// Every committed mark is lost.
    pub fn redraw(&mut self) -> Result<(), CanvasError> {
        let Some(surface) = &self.surface else {
            return Ok(());
        };

        let ctx = cairo::Context::new(surface)?;
        render_background(&ctx, self.background)?;
        if let Some(image) = &self.source_surface {
            ctx.set_source_surface(image, 0.0, 0.0)?;
            ctx.paint()?;
        }
        Ok(())
    }

    /// Replaces the base image and resets the canvas to it.
    ///
    /// `None` forgets the stored image and leaves the buffer as it is.
    pub fn load_image(&mut self, image: Option<PixelBuffer>) -> Result<(), CanvasError> {
        let Some(image) = image else {
            self.source = None;
            self.source_surface = None;
            return Ok(());
        };

        self.source_surface = Some(image.to_surface()?);
        let (width, height) = (image.width, image.height);
        self.source = Some(image);

        self.resize_or_create(width, height)?;
        self.redraw()?;

        info!("Loaded {}x{} image onto canvas", width, height);
        Ok(())
    }

    /// Rasterizes a mark onto the backing buffer, or crops for [`Tool::Crop`].
    ///
    /// Returns `false` when nothing changed (no buffer, or a crop under the
    /// minimum size).
    pub fn commit(
        &mut self,
        tool: Tool,
        style: &Style,
        anchor: Point,
        point: Point,
    ) -> Result<bool, CanvasError> {
        if tool == Tool::Crop {
            return self.crop(anchor, point);
        }
        let Some(surface) = &self.surface else {
            return Ok(false);
        };

        let ctx = cairo::Context::new(surface)?;
        render_mark(&ctx, tool, style, anchor, point)?;
        Ok(true)
    }

    /// Replaces the buffer with the region dragged from `anchor` to `point`.
    ///
    /// The region is truncated to integers. Regions under [`MIN_CROP_SIZE`] in
    /// either dimension are ignored. Parts of the region outside the old buffer
    /// come out transparent.
    pub fn crop(&mut self, anchor: Point, point: Point) -> Result<bool, CanvasError> {
        let (x, y, width, height) = util::crop_region(anchor, point);
        if width < MIN_CROP_SIZE || height < MIN_CROP_SIZE {
            debug!("Ignoring {}x{} crop below minimum size", width, height);
            return Ok(false);
        }
        let Some(old) = &self.surface else {
            return Ok(false);
        };

        let cropped = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        {
            let ctx = cairo::Context::new(&cropped)?;
            ctx.set_operator(cairo::Operator::Source);
            ctx.set_source_surface(old, -(x as f64), -(y as f64))?;
            ctx.paint()?;
        }
        self.surface = Some(cropped);

        info!("Cropped canvas to {}x{} at ({}, {})", width, height, x, y);
        Ok(true)
    }

    /// Composites the backing buffer onto a host-supplied context at the origin.
    pub fn paint_onto(&self, ctx: &cairo::Context) -> Result<(), CanvasError> {
        let Some(surface) = &self.surface else {
            return Ok(());
        };

        ctx.save()?;
        ctx.set_source_surface(surface, 0.0, 0.0)?;
        let result = ctx.paint();
        ctx.restore()?;
        result?;
        Ok(())
    }

    /// Returns the composited result.
    ///
    /// Without a buffer the original image is handed back untouched; with
    /// neither, there is nothing to export.
    pub fn export(&self) -> Result<Option<PixelBuffer>, CanvasError> {
        match &self.surface {
            Some(surface) => Ok(Some(PixelBuffer::from_surface(surface)?)),
            None => Ok(self.source.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;

    fn gradient(width: i32, height: i32) -> PixelBuffer {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 5) as u8, (y * 5) as u8, 77, 255]);
            }
        }
        PixelBuffer::new(width, height, width as usize * 4, data).unwrap()
    }

    #[test]
    fn new_buffer_is_opaque_background() {
        let mut canvas = Canvas::default();
        assert!(canvas.resize_or_create(8, 6).unwrap());
        let out = canvas.export().unwrap().unwrap();
        assert_eq!((out.width, out.height), (8, 6));
        assert_eq!(out.pixel(3, 3), Some([51, 51, 51, 255]));
    }

    #[test]
    fn same_size_does_not_reallocate() {
        let mut canvas = Canvas::default();
        assert!(canvas.resize_or_create(20, 20).unwrap());
        canvas
            .commit(Tool::Pen, &Style::default(), (0.0, 10.0), (20.0, 10.0))
            .unwrap();
        assert!(!canvas.resize_or_create(20, 20).unwrap());
        let out = canvas.export().unwrap().unwrap();
        assert_eq!(out.pixel(10, 10), Some([255, 0, 0, 255]));
    }

    #[test]
    fn load_image_resets_marks() {
        let mut canvas = Canvas::default();
        let image = gradient(30, 30);
        canvas.load_image(Some(image.clone())).unwrap();
        canvas
            .commit(Tool::Pen, &Style::new(RED, 6.0, false, 1.0), (0.0, 15.0), (30.0, 15.0))
            .unwrap();
        assert_ne!(canvas.export().unwrap().unwrap(), image);

        canvas.load_image(Some(image.clone())).unwrap();
        assert_eq!(canvas.export().unwrap().unwrap(), image);
    }

    #[test]
    fn translucent_image_sits_on_background() {
        let mut canvas = Canvas::default();
        canvas
            .load_image(Some(PixelBuffer::filled(4, 4, [0, 0, 0, 0]).unwrap()))
            .unwrap();
        let out = canvas.export().unwrap().unwrap();
        assert_eq!(out.pixel(0, 0), Some([51, 51, 51, 255]));
    }

    #[test]
    fn translucent_background_still_resets_marks() {
        let mut canvas = Canvas::new(Color::new(0.2, 0.2, 0.2, 0.3));
        canvas.resize_or_create(20, 20).unwrap();
        let blank = canvas.export().unwrap().unwrap();
        assert_eq!(blank.pixel(5, 5), Some([51, 51, 51, 255]));

        canvas
            .commit(Tool::Pen, &Style::new(RED, 6.0, false, 1.0), (0.0, 10.0), (20.0, 10.0))
            .unwrap();
        canvas.redraw().unwrap();
        assert_eq!(canvas.export().unwrap().unwrap(), blank);

        let image = PixelBuffer::filled(20, 20, [0, 0, 0, 0]).unwrap();
        canvas
            .commit(Tool::Pen, &Style::new(RED, 6.0, false, 1.0), (0.0, 10.0), (20.0, 10.0))
            .unwrap();
        canvas.load_image(Some(image)).unwrap();
        assert_eq!(canvas.export().unwrap().unwrap(), blank);
    }

    #[test]
    fn export_without_buffer_passes_source_through() {
        let canvas = Canvas::default();
        assert!(canvas.export().unwrap().is_none());
    }

    #[test]
    fn commit_without_buffer_is_noop() {
        let mut canvas = Canvas::default();
        let changed = canvas
            .commit(Tool::Rectangle, &Style::default(), (0.0, 0.0), (5.0, 5.0))
            .unwrap();
        assert!(!changed);
        assert!(!canvas.has_surface());
    }

    #[test]
    fn crop_copies_region_exactly() {
        let mut canvas = Canvas::default();
        let image = gradient(40, 30);
        canvas.load_image(Some(image.clone())).unwrap();

        assert!(canvas.crop((25.0, 20.0), (5.0, 8.0)).unwrap());
        let out = canvas.export().unwrap().unwrap();
        assert_eq!((out.width, out.height), (20, 12));
        for j in 0..12 {
            for i in 0..20 {
                assert_eq!(out.pixel(i, j), image.pixel(5 + i, 8 + j));
            }
        }
    }

    #[test]
    fn crop_below_threshold_is_ignored() {
        let mut canvas = Canvas::default();
        let image = gradient(40, 30);
        canvas.load_image(Some(image.clone())).unwrap();

        assert!(!canvas.crop((0.0, 0.0), (9.9, 25.0)).unwrap());
        assert!(!canvas.crop((0.0, 0.0), (25.0, 9.0)).unwrap());
        assert_eq!(canvas.export().unwrap().unwrap(), image);
    }

    #[test]
    fn redraw_after_crop_keeps_cropped_size() {
        let mut canvas = Canvas::default();
        canvas.load_image(Some(gradient(40, 30))).unwrap();
        canvas.crop((0.0, 0.0), (15.0, 15.0)).unwrap();
        canvas.redraw().unwrap();
        assert_eq!(canvas.size(), Some((15, 15)));
    }
}
