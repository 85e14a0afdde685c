//! Gesture scripts replayed by the headless host.
//!
//! A script is a TOML file holding an ordered list of steps:
//!
//! ```toml
//! [[steps]]
//! action = "tool"
//! tool = "arrow"
//!
//! [[steps]]
//! action = "style"
//! color = "yellow"
//! line_width = 6.0
//!
//! [[steps]]
//! action = "gesture"
//! points = [[10.0, 10.0], [120.0, 80.0]]
//! ```

use crate::config::ColorSpec;
use crate::input::Tool;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Ordered list of steps replayed against one session.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One scripted host event.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    /// Select the tool for the following gestures
    Tool { tool: Tool },
    /// Change any subset of the current style
    Style {
        #[serde(default)]
        color: Option<ColorSpec>,
        #[serde(default)]
        line_width: Option<f64>,
        #[serde(default)]
        fill: Option<bool>,
        #[serde(default)]
        opacity: Option<f64>,
    },
    /// Press at the first point, move through the rest, release at the last
    Gesture { points: Vec<[f64; 2]> },
    /// Report a widget size allocation
    Resize { width: i32, height: i32 },
}

impl Script {
    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse script {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_action() {
        let script = Script::parse(
            r#"
            [[steps]]
            action = "tool"
            tool = "circle"

            [[steps]]
            action = "style"
            color = [0, 0, 255]
            fill = true

            [[steps]]
            action = "gesture"
            points = [[1.0, 2.0], [3.0, 4.0]]

            [[steps]]
            action = "resize"
            width = 320
            height = 200
            "#,
        )
        .unwrap();

        assert_eq!(
            script.steps,
            vec![
                Step::Tool { tool: Tool::Circle },
                Step::Style {
                    color: Some(ColorSpec::Rgb([0, 0, 255])),
                    line_width: None,
                    fill: Some(true),
                    opacity: None,
                },
                Step::Gesture {
                    points: vec![[1.0, 2.0], [3.0, 4.0]],
                },
                Step::Resize {
                    width: 320,
                    height: 200,
                },
            ]
        );
    }

    #[test]
    fn empty_script_has_no_steps() {
        assert!(Script::parse("").unwrap().steps.is_empty());
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = Script::parse("[[steps]]\naction = \"undo\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown variant"), "{err}");
    }
}
