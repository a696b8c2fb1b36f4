//! Output writers for profile data and flamegraphs.
//!
//! This module handles writing data to disk:
//! - JSON profiles (versioned schema)
//! - SVG flamegraphs

pub mod json;
pub mod schema;
pub mod svg;

// Re-export main functions
pub use json::{read_profile, write_profile};
pub use schema::{to_profile, CctProfile, ProfileNode};
pub use svg::write_svg;
