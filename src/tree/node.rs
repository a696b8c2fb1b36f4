//! Arena-backed calling-context tree.
//!
//! All nodes of one tree live in a single vector; children and the parent
//! back-reference are indices into it. Children are the only ownership
//! edges; the parent index exists for traversal convenience and never
//! participates in identity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One run's raw weight samples at a single call path
///
/// **Public** - attached to merged-tree nodes during aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmMeasurement {
    /// Ordinal of the run (VM) that produced the samples
    pub vm: u32,

    /// Raw weight samples, in the order they were observed
    pub samples: Vec<f64>,
}

impl VmMeasurement {
    pub fn new(vm: u32, samples: Vec<f64>) -> Self {
        Self { vm, samples }
    }

    pub fn add_sample(&mut self, value: f64) {
        self.samples.push(value);
    }
}

/// One stack-frame occurrence inside a [`CallTree`]
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    /// Human-readable frame label
    pub label: String,

    /// Labels from the root down to and including this node.
    /// This is the node's identity: two nodes are equal iff their
    /// paths are equal, regardless of weight, measurements or children.
    pub path: Vec<String>,

    /// Non-owning back-reference; `None` for the root
    pub parent: Option<usize>,

    /// Owned children, in insertion order
    pub children: Vec<usize>,

    /// Cumulative sample weight from the run that produced this node.
    /// Meaningless on a merged node until aggregation has run.
    pub weight: f64,

    /// Flat measurement form: identifier -> raw weight samples
    pub measurements: BTreeMap<String, Vec<f64>>,

    /// Run-tagged measurement form: identifier -> per-run records
    pub vm_measurements: BTreeMap<String, Vec<VmMeasurement>>,
}

impl CallNode {
    fn new(label: String, path: Vec<String>, parent: Option<usize>, weight: f64) -> Self {
        Self {
            label,
            path,
            parent,
            children: Vec::new(),
            weight,
            measurements: BTreeMap::new(),
            vm_measurements: BTreeMap::new(),
        }
    }

    /// Labels of all ancestors, root first, excluding this node itself
    pub fn ancestor_labels(&self) -> &[String] {
        &self.path[..self.path.len() - 1]
    }

    /// Depth of the node; the root has depth 0
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    /// Append a raw sample under `identifier` in the flat form
    pub fn add_measurement(&mut self, identifier: &str, weight: f64) {
        self.measurements
            .entry(identifier.to_string())
            .or_default()
            .push(weight);
    }

    /// Append a per-run record under `identifier` in the run-tagged form.
    /// Always appends; records for the same run are not consolidated.
    pub fn add_vm_measurement(&mut self, identifier: &str, record: VmMeasurement) {
        self.vm_measurements
            .entry(identifier.to_string())
            .or_default()
            .push(record);
    }
}

/// Calling-context tree with arena storage
#[derive(Debug, Clone, PartialEq)]
pub struct CallTree {
    nodes: Vec<CallNode>,
}

impl CallTree {
    /// Create a tree holding only a root node
    pub fn new(root_label: impl Into<String>, weight: f64) -> Self {
        let label = root_label.into();
        let path = vec![label.clone()];
        Self {
            nodes: vec![CallNode::new(label, path, None, weight)],
        }
    }

    /// Index of the root node
    pub fn root(&self) -> usize {
        0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: construction seeds a root node and nothing removes
    /// nodes. Exists to pair with [`CallTree::len`].
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &CallNode {
        &self.nodes[idx]
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut CallNode {
        &mut self.nodes[idx]
    }

    /// All node indices, root first, in allocation order
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        0..self.nodes.len()
    }

    /// Append a child under `parent`; the child's path is the parent's
    /// path extended by its own label.
    pub fn add_child(&mut self, parent: usize, label: impl Into<String>, weight: f64) -> usize {
        let label = label.into();
        let mut path = self.nodes[parent].path.clone();
        path.push(label.clone());
        let idx = self.nodes.len();
        self.nodes.push(CallNode::new(label, path, Some(parent), weight));
        self.nodes[parent].children.push(idx);
        idx
    }

    /// Pure path-following lookup: returns the node whose full
    /// root-to-self label sequence equals `path` exactly, or `None`.
    pub fn search(&self, path: &[String]) -> Option<usize> {
        let first = path.first()?;
        if &self.nodes[self.root()].label != first {
            return None;
        }
        let mut current = self.root();
        for segment in &path[1..] {
            current = *self.nodes[current]
                .children
                .iter()
                .find(|&&c| &self.nodes[c].label == segment)?;
        }
        Some(current)
    }

    /// Copy of the subtree rooted at `idx` as an independent tree.
    /// The copy is re-rooted: its ancestor chain above `idx` is discarded
    /// and every path is rebased onto the new root.
    pub fn extract_subtree(&self, idx: usize) -> CallTree {
        let src = &self.nodes[idx];
        let mut out = CallTree::new(src.label.clone(), src.weight);
        out.node_mut(0).measurements = src.measurements.clone();
        out.node_mut(0).vm_measurements = src.vm_measurements.clone();
        self.copy_children(idx, &mut out, 0);
        out
    }

    /// Copy the subtree rooted at `other_idx` of `other` under `parent`
    /// of this tree. Paths and parent back-references are rewritten for
    /// the adopting tree.
    pub fn graft(&mut self, parent: usize, other: &CallTree, other_idx: usize) -> usize {
        let src = other.node(other_idx);
        let idx = self.add_child(parent, src.label.clone(), src.weight);
        self.nodes[idx].measurements = src.measurements.clone();
        self.nodes[idx].vm_measurements = src.vm_measurements.clone();
        other.copy_children(other_idx, self, idx);
        idx
    }

    fn copy_children(&self, src_idx: usize, dst: &mut CallTree, dst_idx: usize) {
        for &child in &self.nodes[src_idx].children {
            let src = &self.nodes[child];
            let idx = dst.add_child(dst_idx, src.label.clone(), src.weight);
            dst.node_mut(idx).measurements = src.measurements.clone();
            dst.node_mut(idx).vm_measurements = src.vm_measurements.clone();
            self.copy_children(child, dst, idx);
        }
    }
}
