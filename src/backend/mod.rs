//! Hosts that drive an annotation session.
//!
//! The engine itself never touches a window system; a host feeds it pointer
//! events and reads back pixels. The headless host replays scripted gestures
//! and writes the export to disk.

pub mod file;
pub mod headless;
pub mod script;

pub use headless::{DEFAULT_CANVAS_SIZE, HeadlessOptions, run};
pub use script::{Script, Step};
