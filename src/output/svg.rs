//! SVG flamegraph output writer.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write SVG content to a file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing SVG to: {}", output_path.display());

    if output_path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent)
                .map_err(|e| OutputError::InvalidPath(format!("Cannot create directory: {}", e)))?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(svg_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("SVG written successfully ({} bytes)", svg_content.len());

    Ok(())
}
