mod core;
mod mouse;
mod render;

pub use self::core::{DrawingState, InputState};
