use cct_merge::tree::{filter_infrastructure, isolate_entry_subtrees, CallTree};
use pretty_assertions::assert_eq;

fn labels(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn sample_tree() -> CallTree {
    // root -> foo -> 9 testcase(...) -> bar
    //      \-> baz -> 9 testcase(...)
    let mut tree = CallTree::new("root", 12.0);
    let foo = tree.add_child(tree.root(), "foo", 10.0);
    let tc1 = tree.add_child(foo, "9 testcase(...)", 9.0);
    tree.add_child(tc1, "bar", 5.0);
    let baz = tree.add_child(tree.root(), "baz", 2.0);
    tree.add_child(baz, "9 testcase(...)", 2.0);
    tree
}

#[test]
fn test_path_invariants_hold_for_every_node() {
    let tree = sample_tree();
    for idx in tree.indices() {
        let node = tree.node(idx);
        assert_eq!(node.path.len(), node.depth() + 1);
        match node.parent {
            Some(parent) => {
                let parent = tree.node(parent);
                let mut expected = parent.path.clone();
                expected.push(node.label.clone());
                assert_eq!(node.path, expected);
            }
            None => assert_eq!(idx, tree.root()),
        }
    }
}

#[test]
fn test_search_finds_unique_node_by_full_path() {
    let tree = sample_tree();
    let idx = tree
        .search(&labels(&["root", "foo", "9 testcase(...)", "bar"]))
        .unwrap();
    assert_eq!(tree.node(idx).label, "bar");
    assert_eq!(tree.node(idx).weight, 5.0);
}

#[test]
fn test_search_returns_none_for_absent_paths() {
    let tree = sample_tree();
    assert!(tree.search(&labels(&["root", "missing"])).is_none());
    assert!(tree.search(&labels(&["foo", "bar"])).is_none());
    assert!(tree.search(&[]).is_none());
}

#[test]
fn test_isolation_returns_one_root_per_occurrence() {
    let tree = sample_tree();
    let subtrees = isolate_entry_subtrees("testcase", &tree);

    assert_eq!(subtrees.len(), 2);
    for sub in &subtrees {
        let root = sub.node(sub.root());
        assert_eq!(root.label, "9 testcase(...)");
        assert_eq!(root.path, labels(&["9 testcase(...)"]));
    }
    // The deeper occurrence keeps its descendants.
    assert!(subtrees
        .iter()
        .any(|s| s.search(&labels(&["9 testcase(...)", "bar"])).is_some()));
}

#[test]
fn test_infrastructure_filter_preserves_descendants() {
    let mut tree = CallTree::new("root", 10.0);
    let infra = tree.add_child(tree.root(), "java.lang.Thread.run()", 9.0);
    let inner = tree.add_child(infra, "jdk.internal.reflect.invoke()", 8.0);
    tree.add_child(inner, "9 testcase(...)", 7.0);

    let filtered = filter_infrastructure(&tree);

    // Both infra frames spliced out, testcase re-parented onto root.
    assert_eq!(filtered.len(), 2);
    let tc = filtered
        .search(&labels(&["root", "9 testcase(...)"]))
        .unwrap();
    assert_eq!(filtered.node(tc).weight, 7.0);
}
