// Drives an annotation session without a display: loads the base image or a
// blank canvas, replays a gesture script through the same pointer handlers an
// interactive host would call, then saves the export.
use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::path::PathBuf;

use super::file;
use super::script::{Script, Step};
use crate::config::Config;
use crate::input::{InputState, MouseButton};

/// Canvas size used when no input image is given.
pub const DEFAULT_CANVAS_SIZE: (i32, i32) = (800, 600);

/// Everything the headless host needs for one run.
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    /// Gesture script to replay
    pub script: PathBuf,
    /// Base image; a blank canvas of `width` x `height` when absent
    pub input: Option<PathBuf>,
    /// Output file; derived from the `[output]` config section when absent
    pub output: Option<PathBuf>,
    pub width: i32,
    pub height: i32,
    /// Config file overriding the default location
    pub config: Option<PathBuf>,
}

impl HeadlessOptions {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
            input: None,
            output: None,
            width: DEFAULT_CANVAS_SIZE.0,
            height: DEFAULT_CANVAS_SIZE.1,
            config: None,
        }
    }
}

/// Runs one headless session and returns the path of the written image.
pub fn run(options: &HeadlessOptions) -> Result<PathBuf> {
    let config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let script = Script::load(&options.script)?;

    let mut state = InputState::from_config(&config);
    match &options.input {
        Some(path) => {
            let image = file::load_png(path)?;
            state.load_image(Some(image))?;
        }
        None => {
            if options.width <= 0 || options.height <= 0 {
                bail!(
                    "Canvas size must be positive, got {}x{}",
                    options.width,
                    options.height
                );
            }
            state.on_size_allocate(options.width, options.height)?;
        }
    }

    for (index, step) in script.steps.iter().enumerate() {
        apply_step(&mut state, step).with_context(|| format!("Step {} failed", index + 1))?;
        let damage = state.take_dirty_regions();
        debug!("Step {}: {} damaged region(s)", index + 1, damage.len());
    }

    let image = state
        .export()?
        .context("Canvas has no content to export")?;

    let output = match &options.output {
        Some(path) => path.clone(),
        None => file::default_output_path(&config.output)?,
    };
    file::save_png(&image, &output)?;

    info!(
        "Replayed {} step(s) onto {}x{} canvas",
        script.steps.len(),
        image.width,
        image.height
    );
    Ok(output)
}

/// Feeds one scripted event into the session.
pub fn apply_step(state: &mut InputState, step: &Step) -> Result<()> {
    match step {
        Step::Tool { tool } => state.select_tool(*tool),
        Step::Style {
            color,
            line_width,
            fill,
            opacity,
        } => {
            if let Some(color) = color {
                state.set_color(color.to_color());
            }
            if let Some(line_width) = line_width {
                if *line_width <= 0.0 {
                    bail!("line_width must be positive, got {line_width}");
                }
                state.set_line_width(*line_width);
            }
            if let Some(fill) = fill {
                state.set_fill(*fill);
            }
            if let Some(opacity) = opacity {
                state.set_opacity(opacity.clamp(0.0, 1.0));
            }
        }
        Step::Gesture { points } => replay_gesture(state, points)?,
        Step::Resize { width, height } => state.on_size_allocate(*width, *height)?,
    }
    Ok(())
}

fn replay_gesture(state: &mut InputState, points: &[[f64; 2]]) -> Result<()> {
    let Some((&[x, y], rest)) = points.split_first() else {
        warn!("Skipping gesture without points");
        return Ok(());
    };

    state.on_pointer_down(x, y, MouseButton::Left);
    let ([end_x, end_y], moves) = match rest.split_last() {
        Some((&last, moves)) => (last, moves),
        None => ([x, y], rest),
    };
    for &[mx, my] in moves {
        state.on_pointer_motion(mx, my)?;
    }
    state.on_pointer_up(end_x, end_y, MouseButton::Left)?;
    Ok(())
}
