//! Raster annotation engine for screenshots.
//!
//! A host hands the engine a base image (or just a widget size), forwards
//! pointer events, asks it to paint on every repaint, and exports the
//! annotated pixels when done. Freehand tools draw straight into the canvas;
//! shape tools preview while dragging and commit on release.

pub mod backend;
pub mod config;
pub mod draw;
pub mod input;
pub mod util;

pub use config::Config;
