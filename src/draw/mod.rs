//! Rendering primitives and the permanent canvas (Cairo-based).
//!
//! This module defines the core drawing types used for annotation:
//! - [`Color`] and [`Style`]: what a mark looks like
//! - [`Shape`]: the geometry a tool produces for a drag
//! - [`Canvas`]: the backing buffer holding the image plus committed marks
//! - [`PixelBuffer`]: the straight-alpha RGBA image exchanged with hosts
//! - Rendering functions shared by preview and commit

pub mod canvas;
pub mod color;
pub mod dirty;
pub mod error;
pub mod pixels;
pub mod render;
pub mod shape;
pub mod style;

// Re-export commonly used types at module level
pub use canvas::{Canvas, MIN_CROP_SIZE};
pub use color::Color;
pub use dirty::DirtyTracker;
pub use error::CanvasError;
pub use pixels::PixelBuffer;
pub use render::{render_crop_overlay, render_mark, render_shape};
pub use shape::Shape;
pub use style::{HIGHLIGHTER_ALPHA, Style};

// Re-export color constants for public API
pub use color::{BLACK, BLUE, CANVAS_GRAY, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
