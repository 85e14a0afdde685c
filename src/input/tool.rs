//! Drawing tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines what happens while the primary button is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand drawing - follows the pointer path
    #[default]
    Pen,
    /// Translucent marker ink
    Highlighter,
    /// Cuts a transparent path through the canvas
    Eraser,
    /// Rectangle from corner to corner
    Rectangle,
    /// Ellipse inscribed in the drag box
    Circle,
    /// Straight line between press and release
    Line,
    /// Line with a chevron at the release point
    Arrow,
    /// Replaces the canvas with the dragged region
    Crop,
}

/// How a tool reacts to pointer motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFamily {
    /// Rasterizes every motion segment immediately
    Freehand,
    /// Previews while dragging, commits once on release
    Shape,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 8] = [
        Tool::Pen,
        Tool::Highlighter,
        Tool::Eraser,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Line,
        Tool::Arrow,
        Tool::Crop,
    ];

    pub fn family(self) -> ToolFamily {
        match self {
            Tool::Pen | Tool::Highlighter | Tool::Eraser => ToolFamily::Freehand,
            Tool::Rectangle | Tool::Circle | Tool::Line | Tool::Arrow | Tool::Crop => {
                ToolFamily::Shape
            }
        }
    }

    pub fn is_freehand(self) -> bool {
        self.family() == ToolFamily::Freehand
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_split_freehand_from_shapes() {
        let freehand: Vec<Tool> = Tool::ALL
            .into_iter()
            .filter(|tool| tool.is_freehand())
            .collect();
        assert_eq!(freehand, vec![Tool::Pen, Tool::Highlighter, Tool::Eraser]);
        assert_eq!(Tool::Crop.family(), ToolFamily::Shape);
    }
}
