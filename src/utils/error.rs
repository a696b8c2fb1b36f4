//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading and decoding sample files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read sample file: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("filename '{0}' does not contain a run ordinal token (_vm_<digits>_)")]
    MissingRunOrdinal(String),

    #[error("invalid sample format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur while building the merged tree
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("run file set cannot be empty")]
    NoRunFiles,

    #[error("no sample files match commit '{0}'")]
    NoMatchingRuns(String),

    #[error("no frame matching entry method '{0}' was found in any run")]
    EntryMethodNotFound(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Empty stack data")]
    EmptyStacks,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
