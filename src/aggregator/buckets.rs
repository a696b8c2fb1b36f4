//! Phase 1 of measurement aggregation: call-path bucket construction.

use crate::tree::{CallTree, VmMeasurement};
use std::collections::HashMap;

/// Call path -> per-run measurement records, at most one record per run
/// ordinal per path. Keys are call paths truncated to start at the
/// benchmark entry frame.
pub type MeasurementBuckets = HashMap<Vec<String>, Vec<VmMeasurement>>;

/// Fold one run's tree into the bucket map.
///
/// Walks the tree depth-first with an explicit stack; sampled call depth
/// is unbounded and must not risk exhausting the call stack. For every
/// node the bucket key is its path with everything before the entry frame
/// stripped. A sample from a run already present in the bucket appends to
/// that run's record; otherwise a new record is seeded with the sample.
pub fn collect_run_measurements(
    buckets: &mut MeasurementBuckets,
    tree: &CallTree,
    vm: u32,
    entry_fragment: &str,
) {
    let mut stack = vec![tree.root()];
    while let Some(idx) = stack.pop() {
        let node = tree.node(idx);
        let path = truncate_at_entry(&node.path, entry_fragment);

        let records = buckets.entry(path).or_default();
        match records.iter_mut().find(|r| r.vm == vm) {
            Some(record) => record.add_sample(node.weight),
            None => records.push(VmMeasurement::new(vm, vec![node.weight])),
        }

        stack.extend(node.children.iter().copied());
    }
}

// Strip every label preceding the first one that contains the entry
// fragment. A path with no entry label is kept whole; on correctly
// isolated trees the root itself is the entry frame.
fn truncate_at_entry(path: &[String], entry_fragment: &str) -> Vec<String> {
    let start = path
        .iter()
        .position(|label| label.contains(entry_fragment))
        .unwrap_or(0);
    path[start..].to_vec()
}
