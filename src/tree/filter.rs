//! Frame filtering: infrastructure removal and entry-subtree isolation.
//!
//! Both operations produce new trees and leave their input untouched.

use super::node::CallTree;
use crate::utils::config::INFRA_FRAME_PREFIXES;
use log::debug;

/// Decide whether a frame label names JVM/native runtime infrastructure.
///
/// Sampling frontends prepend a numeric type-id token to the label
/// (e.g. `"9 java.util.ArrayList.add(...)"`), so matching starts after
/// the first space when one is present.
pub fn is_infrastructure_frame(label: &str) -> bool {
    let name = match label.split_once(' ') {
        Some((prefix, rest)) if prefix.chars().all(|c| c.is_ascii_digit()) => rest,
        _ => label,
    };
    INFRA_FRAME_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Remove infrastructure frames from a tree.
///
/// Excluded frames are spliced out: their children are re-parented onto
/// the nearest surviving ancestor, so descendant sample weight is never
/// silently discarded. The root always survives. Paths of re-parented
/// descendants are recomputed for the shortened ancestor chain.
pub fn filter_infrastructure(tree: &CallTree) -> CallTree {
    let root = tree.node(tree.root());
    let mut out = CallTree::new(root.label.clone(), root.weight);
    let dst_root = out.root();
    splice_children(tree, tree.root(), &mut out, dst_root);
    out
}

fn splice_children(src: &CallTree, src_idx: usize, dst: &mut CallTree, dst_idx: usize) {
    for &child in &src.node(src_idx).children {
        let node = src.node(child);
        if is_infrastructure_frame(&node.label) {
            debug!("splicing out infrastructure frame: {}", node.label);
            splice_children(src, child, dst, dst_idx);
        } else {
            let idx = dst.add_child(dst_idx, node.label.clone(), node.weight);
            splice_children(src, child, dst, idx);
        }
    }
}

/// Isolate every subtree rooted at a frame whose label contains `fragment`.
///
/// A benchmark entry method may recur at multiple call sites or recursion
/// depths within one sampled run; each occurrence is returned re-rooted as
/// an independent tree so that cross-run merge can treat all roots as
/// co-equal entry frames.
pub fn isolate_entry_subtrees(fragment: &str, tree: &CallTree) -> Vec<CallTree> {
    let matches: Vec<CallTree> = tree
        .indices()
        .filter(|&idx| tree.node(idx).label.contains(fragment))
        .map(|idx| tree.extract_subtree(idx))
        .collect();
    debug!(
        "isolated {} subtree(s) for entry fragment '{}'",
        matches.len(),
        fragment
    );
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_label_detection() {
        assert!(is_infrastructure_frame("java.util.ArrayList.add([...])"));
        assert!(is_infrastructure_frame("9 jdk.internal.misc.Unsafe.park"));
        assert!(is_infrastructure_frame("start_thread"));
        assert!(!is_infrastructure_frame("9 com.example.Benchmark.run()"));
    }

    #[test]
    fn test_splice_reparents_descendants() {
        let mut tree = CallTree::new("root", 10.0);
        let infra = tree.add_child(tree.root(), "java.lang.Thread.run()", 9.0);
        tree.add_child(infra, "work()", 7.0);

        let filtered = filter_infrastructure(&tree);
        assert_eq!(filtered.len(), 2);
        let work = filtered
            .search(&["root".to_string(), "work()".to_string()])
            .unwrap();
        assert_eq!(filtered.node(work).weight, 7.0);
        assert_eq!(filtered.node(work).depth(), 1);
    }
}
