//! Flamegraph generation from merged calling-context trees.
//!
//! Converts the annotated tree into an interactive SVG where horizontal
//! extent is proportional to aggregated sample weight.

pub mod generator;

// Re-export main types
pub use generator::{aggregated_weight, generate_flamegraph, FlamegraphConfig};
