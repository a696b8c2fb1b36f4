//! Calling-context tree model, filtering, and diagnostic rendering.
//!
//! A node's identity is its full root-to-self label path; everything
//! else (weight, measurements, children) is payload. This identity is
//! the sole key used by the merge engine and the aggregator.

pub mod filter;
pub mod node;
pub mod render;

// Re-export main types and functions
pub use filter::{filter_infrastructure, is_infrastructure_frame, isolate_entry_subtrees};
pub use node::{CallNode, CallTree, VmMeasurement};
pub use render::render_text;
