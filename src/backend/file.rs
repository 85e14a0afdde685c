//! File saving for annotated images.

use crate::config::OutputConfig;
use crate::draw::PixelBuffer;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf> {
    if !directory.exists() {
        log::info!("Creating save directory: {}", directory.display());
        fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create {}", directory.display()))?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Path used when the caller names no output file.
pub fn default_output_path(config: &OutputConfig) -> Result<PathBuf> {
    let directory = ensure_directory_exists(&expand_tilde(&config.save_directory))?;
    Ok(directory.join(generate_filename(&config.filename_template, "png")))
}

/// Encode `image` as PNG and write it to `path`.
///
/// The file is readable and writable by its owner only.
pub fn save_png(image: &PixelBuffer, path: &Path) -> Result<()> {
    {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        image
            .write_png(&mut writer)
            .with_context(|| format!("Failed to encode PNG for {}", path.display()))?;
        writer.flush()?;
    }

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(0o600))?;
    }

    log::info!(
        "Saved {}x{} image to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}

/// Decode the PNG at `path`.
pub fn load_png(path: &Path) -> Result<PixelBuffer> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    PixelBuffer::read_png(&mut file)
        .with_context(|| format!("Failed to decode PNG from {}", path.display()))
}
