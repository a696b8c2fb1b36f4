//! Input schema for raw sampling files.
//!
//! Each sample file carries one generic frame tree, produced per run by
//! the external sampling collaborator. The schema is intentionally
//! minimal: label, method name, hidden flag, cumulative weight, root
//! flag, ordered children.

use serde::{Deserialize, Serialize};

/// One frame of the generic frame tree, as decoded from a sample file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFrameNode {
    /// Human-readable, separator-sensitive frame label
    pub frame: String,

    /// Bare method name; absent or empty marks the frame as noise
    #[serde(default)]
    pub method: Option<String>,

    /// Frames flagged hidden by the sampler are excluded from trees
    #[serde(default)]
    pub hidden: bool,

    /// Cumulative sample weight (non-negative)
    pub weight: f64,

    /// Set on the synthetic root frame of each sample
    #[serde(default)]
    pub root: bool,

    /// Ordered child frames
    #[serde(default)]
    pub children: Vec<RawFrameNode>,
}
