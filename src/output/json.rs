//! JSON profile output writer.
//!
//! Writes CctProfile structs to JSON files with proper formatting.

use super::schema::CctProfile;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a profile to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_profile(profile: &CctProfile, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing profile to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, profile).map_err(OutputError::SerializationFailed)?;

    info!(
        "Profile written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read a profile from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<CctProfile, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading profile from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let profile: CctProfile = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Profile loaded: version {}, commit {}",
        profile.version, profile.commit
    );

    Ok(profile)
}

/// Validate that output path is writable
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
