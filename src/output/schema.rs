//! Output JSON schema definitions for merged-tree profiles.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::tree::{CallTree, VmMeasurement};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level profile structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CctProfile {
    /// Schema version for compatibility checking
    pub version: String,

    /// Commit the measurements are attributed to
    pub commit: String,

    /// Benchmark entry method fragment the tree was isolated at
    pub entry_method: String,

    /// Number of runs folded into the tree
    pub runs: usize,

    /// Timestamp when profile was generated
    pub generated_at: String,

    /// Root of the merged, measurement-annotated tree
    pub root: ProfileNode,
}

/// One node of the serialized tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileNode {
    /// Human-readable frame label
    pub frame: String,

    /// Cumulative sample weight (run-scoped; see vm_measurements for
    /// the per-run view on merged trees)
    pub weight: f64,

    /// Flat measurement map: identifier -> raw samples
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: BTreeMap<String, Vec<f64>>,

    /// Run-tagged measurement map: identifier -> per-run records
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vm_measurements: BTreeMap<String, Vec<VmMeasurement>>,

    /// Child nodes, in merge order
    pub children: Vec<ProfileNode>,
}

/// Project a merged tree into the serializable profile form
pub fn to_profile(tree: &CallTree, commit: &str, entry_method: &str, runs: usize) -> CctProfile {
    CctProfile {
        version: SCHEMA_VERSION.to_string(),
        commit: commit.to_string(),
        entry_method: entry_method.to_string(),
        runs,
        generated_at: chrono::Utc::now().to_rfc3339(),
        root: to_profile_node(tree, tree.root()),
    }
}

fn to_profile_node(tree: &CallTree, idx: usize) -> ProfileNode {
    let node = tree.node(idx);
    ProfileNode {
        frame: node.label.clone(),
        weight: node.weight,
        measurements: node.measurements.clone(),
        vm_measurements: node.vm_measurements.clone(),
        children: node
            .children
            .iter()
            .map(|&c| to_profile_node(tree, c))
            .collect(),
    }
}
