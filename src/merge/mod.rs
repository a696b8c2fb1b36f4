//! Structural merge of per-run calling-context trees.
//!
//! Merging is purely structural: nodes are matched by call-path identity
//! and weights are never summed or overwritten. Weight is run-scoped and
//! stays attributable to its originating run; reconciliation is the
//! aggregator's job, after all runs have been folded.

use crate::tree::CallTree;
use log::warn;

/// Fold a sequence of optional trees left-to-right into one tree.
///
/// `None` entries are skipped; the first `Some` seeds the accumulator and
/// every later `Some` is merged into it. Returns `None` when no tree was
/// supplied at all. The result's structure does not depend on input
/// order, because children are matched by identity rather than position.
pub fn merge_trees(trees: Vec<Option<CallTree>>) -> Option<CallTree> {
    let mut accumulator: Option<CallTree> = None;
    for tree in trees.into_iter().flatten() {
        match accumulator.as_mut() {
            None => accumulator = Some(tree),
            Some(acc) => merge_into(acc, &tree),
        }
    }
    accumulator
}

/// Merge `incoming` into `accumulator`.
///
/// The two roots must be identity-equal; callers are expected to have
/// isolated entry subtrees beforehand so roots always match. A mismatch
/// is logged and the incoming tree skipped rather than corrupting the
/// accumulator.
pub fn merge_into(accumulator: &mut CallTree, incoming: &CallTree) {
    let acc_root = accumulator.root();
    let inc_root = incoming.root();
    if accumulator.node(acc_root).path != incoming.node(inc_root).path {
        warn!(
            "cannot merge tree rooted at '{}' into accumulator rooted at '{}': identities differ",
            incoming.node(inc_root).label,
            accumulator.node(acc_root).label
        );
        return;
    }
    merge_children(accumulator, acc_root, incoming, inc_root);
}

fn merge_children(acc: &mut CallTree, acc_idx: usize, inc: &CallTree, inc_idx: usize) {
    for &inc_child in &inc.node(inc_idx).children {
        let label = &inc.node(inc_child).label;
        // Linear scan by label; branching near the entry frame is small.
        let matched = acc
            .node(acc_idx)
            .children
            .iter()
            .copied()
            .find(|&c| &acc.node(c).label == label);
        match matched {
            Some(acc_child) => merge_children(acc, acc_child, inc, inc_child),
            None => {
                acc.graft(acc_idx, inc, inc_child);
            }
        }
    }
}
