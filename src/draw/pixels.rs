//! Portable pixel buffer exchanged with the host.
//!
//! Cairo stores ARGB32 as premultiplied native-endian words. Hosts deal in
//! straight-alpha RGBA bytes, so conversion happens here and nowhere else.

use super::error::CanvasError;
use std::io::{Read, Write};

/// Straight-alpha RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Bytes per row (at least `width * 4`)
    pub stride: usize,
    /// Row-major RGBA bytes, `stride * height` long
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw RGBA bytes, checking the dimensions against the data length.
    pub fn new(width: i32, height: i32, stride: usize, data: Vec<u8>) -> Result<Self, CanvasError> {
        let buffer = Self {
            width,
            height,
            stride,
            data,
        };
        buffer.validate()?;
        Ok(buffer)
    }

    /// Checks that the dimensions, stride and data length agree.
    ///
    /// Fields are public, so conversions re-check before touching the bytes.
    fn validate(&self) -> Result<(), CanvasError> {
        let (width, height, stride) = (self.width, self.height, self.stride);
        if width <= 0 || height <= 0 {
            return Err(CanvasError::InvalidBuffer(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        let row_bytes = width as usize * 4;
        if stride < row_bytes {
            return Err(CanvasError::InvalidBuffer(format!(
                "stride {stride} is smaller than a {width}-pixel row"
            )));
        }
        let needed = stride
            .checked_mul(height as usize)
            .ok_or_else(|| CanvasError::InvalidBuffer(format!("{width}x{height} is too large")))?;
        if self.data.len() < needed {
            return Err(CanvasError::InvalidBuffer(format!(
                "expected {needed} bytes for {width}x{height}, got {}",
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Creates a tightly packed buffer filled with one RGBA value.
    pub fn filled(width: i32, height: i32, rgba: [u8; 4]) -> Result<Self, CanvasError> {
        let stride = width.max(0) as usize * 4;
        let data = rgba.repeat(width.max(0) as usize * height.max(0) as usize);
        Self::new(width, height, stride, data)
    }

    /// Returns the RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride + x as usize * 4;
        let px = self.data.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copies a Cairo image surface into a tightly packed straight-alpha buffer.
    pub fn from_surface(surface: &cairo::ImageSurface) -> Result<Self, CanvasError> {
        let width = surface.width();
        let height = surface.height();
        let src_stride = surface.stride() as usize;
        let row_bytes = width as usize * 4;
        let mut data = vec![0u8; row_bytes * height as usize];
        // RGB24 leaves the top byte undefined; those pixels are always opaque.
        let opaque = surface.format() == cairo::Format::Rgb24;

        surface.with_data(|src| {
            for (src_row, dst_row) in src.chunks(src_stride).zip(data.chunks_mut(row_bytes)) {
                for (src_px, dst_px) in src_row[..row_bytes]
                    .chunks_exact(4)
                    .zip(dst_row.chunks_exact_mut(4))
                {
                    let mut argb =
                        u32::from_ne_bytes([src_px[0], src_px[1], src_px[2], src_px[3]]);
                    if opaque {
                        argb |= 0xff00_0000;
                    }
                    dst_px.copy_from_slice(&unpremultiply(argb));
                }
            }
        })?;

        Self::new(width, height, row_bytes, data)
    }

    /// Creates a new Cairo image surface holding this buffer.
    pub fn to_surface(&self) -> Result<cairo::ImageSurface, CanvasError> {
        self.validate()?;
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, self.width, self.height)?;
        let dst_stride = surface.stride() as usize;
        let row_bytes = self.width as usize * 4;
        {
            let mut dst = surface.data()?;
            for (src_row, dst_row) in self
                .data
                .chunks(self.stride)
                .take(self.height as usize)
                .zip(dst.chunks_mut(dst_stride))
            {
                for (src_px, dst_px) in src_row[..row_bytes]
                    .chunks_exact(4)
                    .zip(dst_row[..row_bytes].chunks_exact_mut(4))
                {
                    let argb = premultiply([src_px[0], src_px[1], src_px[2], src_px[3]]);
                    dst_px.copy_from_slice(&argb.to_ne_bytes());
                }
            }
        }
        Ok(surface)
    }

    /// Decodes a PNG stream.
    pub fn read_png<R: Read>(reader: &mut R) -> Result<Self, CanvasError> {
        let surface = cairo::ImageSurface::create_from_png(reader)?;
        Self::from_surface(&surface)
    }

    /// Encodes this buffer as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), CanvasError> {
        let surface = self.to_surface()?;
        surface.write_to_png(writer)?;
        Ok(())
    }
}

fn premultiply([r, g, b, a]: [u8; 4]) -> u32 {
    let scale = |c: u8| (c as u32 * a as u32 + 127) / 255;
    (a as u32) << 24 | scale(r) << 16 | scale(g) << 8 | scale(b)
}

fn unpremultiply(argb: u32) -> [u8; 4] {
    let a = argb >> 24;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let scale = |c: u32| ((c * 255 + a / 2) / a).min(255) as u8;
    [
        scale((argb >> 16) & 0xff),
        scale((argb >> 8) & 0xff),
        scale(argb & 0xff),
        a as u8,
    ]
}
