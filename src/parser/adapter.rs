//! Frame adapter: generic frame tree -> internal calling-context tree.

use super::schema::RawFrameNode;
use crate::tree::CallTree;
use log::debug;

/// Convert an externally supplied frame tree into a [`CallTree`].
///
/// A non-root frame whose method name is absent, empty, or flagged hidden
/// is treated as noise and dropped together with its whole subtree. The
/// root frame is always kept, even when it would otherwise be excluded,
/// so a non-empty input always yields a tree. Weights are copied verbatim
/// from the input's cumulative weights.
pub fn adapt_frame_tree(raw: &RawFrameNode) -> CallTree {
    let mut tree = CallTree::new(raw.frame.clone(), raw.weight);
    adapt_children(raw, &mut tree, 0);
    tree
}

fn adapt_children(raw: &RawFrameNode, tree: &mut CallTree, parent: usize) {
    for child in &raw.children {
        if is_excluded(child) {
            debug!("excluding noise frame: {}", child.frame);
            continue;
        }
        let idx = tree.add_child(parent, child.frame.clone(), child.weight);
        adapt_children(child, tree, idx);
    }
}

fn is_excluded(raw: &RawFrameNode) -> bool {
    raw.hidden || raw.method.as_deref().map_or(true, str::is_empty)
}
