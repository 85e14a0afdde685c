//! Errors raised by the rendering backend.

use thiserror::Error;

/// Failures the canvas cannot degrade around.
///
/// Everything else (drawing before a surface exists, tiny crops, secondary
/// buttons) is silently ignored rather than reported.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Cairo operation failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data unavailable: {0}")]
    SurfaceData(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),
}
