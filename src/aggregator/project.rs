//! Phase 2 of measurement aggregation: projection onto the merged tree.

use super::buckets::MeasurementBuckets;
use crate::tree::CallTree;
use log::debug;

/// Attach every bucket's records to the merged tree under `identifier`.
///
/// Each call path is located with a pure path-following lookup. An absent
/// path is skipped silently: it belongs to a run-only node with no
/// structural counterpart, which correctly isolated inputs should not
/// produce but which must not fail the whole run. Records are appended,
/// never merged, so running projection twice under the same identifier
/// doubles the attached samples.
pub fn attach_measurements(tree: &mut CallTree, buckets: &MeasurementBuckets, identifier: &str) {
    let mut attached = 0usize;
    for (path, records) in buckets {
        match tree.search(path) {
            Some(idx) => {
                for record in records {
                    tree.node_mut(idx).add_vm_measurement(identifier, record.clone());
                }
                attached += 1;
            }
            None => {
                debug!("no node at call path {:?}; bucket skipped", path);
            }
        }
    }
    debug!(
        "attached {} of {} buckets under identifier '{}'",
        attached,
        buckets.len(),
        identifier
    );
}
