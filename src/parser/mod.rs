//! Sample-file parsing and frame-tree adaptation.
//!
//! This module handles:
//! - Decoding raw JSON sample files into generic frame trees
//! - Extracting the run ordinal from sample filenames
//! - Adapting generic frame trees into internal calling-context trees

pub mod adapter;
pub mod schema;

// Re-export main types
pub use adapter::adapt_frame_tree;
pub use schema::RawFrameNode;

use crate::utils::config::RUN_ORDINAL_PATTERN;
use crate::utils::error::ParseError;
use log::debug;
use regex::Regex;
use std::fs::File;
use std::path::Path;
use std::sync::OnceLock;

/// Decode one raw sample file into a generic frame tree
pub fn parse_sample(path: impl AsRef<Path>) -> Result<RawFrameNode, ParseError> {
    let path = path.as_ref();
    debug!("reading sample file: {}", path.display());
    let file = File::open(path)?;
    let raw: RawFrameNode = serde_json::from_reader(file)?;
    Ok(raw)
}

/// Extract the run ordinal from a sample filename.
///
/// Every per-run sample file carries a `_vm_<digits>_` token; its absence
/// is a hard failure, no default ordinal is substituted.
pub fn extract_run_ordinal(filename: &str) -> Result<u32, ParseError> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(RUN_ORDINAL_PATTERN).expect("run ordinal pattern must compile")
    });

    let captures = pattern
        .captures(filename)
        .ok_or_else(|| ParseError::MissingRunOrdinal(filename.to_string()))?;
    captures[1]
        .parse::<u32>()
        .map_err(|e| ParseError::InvalidFormat(format!("run ordinal in '{}': {}", filename, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ordinal_extraction() {
        assert_eq!(extract_run_ordinal("bench_vm_3_x.sample").unwrap(), 3);
        assert_eq!(extract_run_ordinal("a_vm_17_abc123.sample").unwrap(), 17);
    }

    #[test]
    fn test_missing_run_ordinal_is_an_error() {
        let err = extract_run_ordinal("bench.sample").unwrap_err();
        assert!(matches!(err, ParseError::MissingRunOrdinal(_)));
    }
}
