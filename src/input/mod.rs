//! Pointer handling and tool state machine.
//!
//! This module translates host pointer events into drawing actions. It keeps
//! the active tool and style, tracks the current gesture (idle or drawing),
//! and decides whether each event rasterizes onto the canvas or only refreshes
//! the preview.

pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::MouseButton;
pub use state::{DrawingState, InputState};
pub use tool::{Tool, ToolFamily};
