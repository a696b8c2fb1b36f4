//! Indented depth-first text rendering of a tree, for diagnostics.
//!
//! Not a machine-readable format; the JSON profile is the stable output.

use super::node::{CallNode, CallTree};

/// Render the whole tree as an indented listing, one node per line,
/// with a flattened view of the node's measurements.
pub fn render_text(tree: &CallTree) -> String {
    let mut out = String::new();
    render_node(tree, tree.root(), "", true, &mut out);
    out
}

fn render_node(tree: &CallTree, idx: usize, prefix: &str, is_last: bool, out: &mut String) {
    let node = tree.node(idx);
    out.push_str(prefix);
    out.push_str(if is_last { "└────── " } else { "├────── " });
    out.push_str(&format!(
        "{} [Measurements: {{ {} }}], cWeight: {}\n",
        node.label,
        flatten_measurements(node),
        node.weight
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
    let children = &node.children;
    for (i, &child) in children.iter().enumerate() {
        render_node(tree, child, &child_prefix, i == children.len() - 1, out);
    }
}

// Run-tagged records take precedence over the flat form, like the
// serialized profile.
fn flatten_measurements(node: &CallNode) -> String {
    let mut flat = String::new();
    if !node.vm_measurements.is_empty() {
        for records in node.vm_measurements.values() {
            for record in records {
                for sample in &record.samples {
                    flat.push_str(&format!("{},", sample));
                }
                flat.push(';');
            }
        }
    } else {
        for samples in node.measurements.values() {
            for sample in samples {
                flat.push_str(&format!("{},", sample));
            }
            flat.push(';');
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::VmMeasurement;

    #[test]
    fn test_render_shows_every_label_once() {
        let mut tree = CallTree::new("root", 3.0);
        let foo = tree.add_child(tree.root(), "foo", 2.0);
        tree.add_child(foo, "bar", 1.0);
        tree.add_child(tree.root(), "baz", 1.0);

        let text = render_text(&tree);
        for label in ["root", "foo", "bar", "baz"] {
            assert_eq!(text.matches(label).count(), 1, "label {label}");
        }
    }

    #[test]
    fn test_render_falls_back_to_flat_measurements() {
        let mut tree = CallTree::new("root", 3.0);
        tree.node_mut(0).add_measurement("rev1", 2.0);
        tree.node_mut(0).add_measurement("rev1", 4.0);

        let text = render_text(&tree);
        assert!(text.contains("2,4,;"));
    }

    #[test]
    fn test_render_flattens_vm_measurements() {
        let mut tree = CallTree::new("root", 3.0);
        tree.node_mut(0)
            .add_vm_measurement("rev1", VmMeasurement::new(0, vec![5.0, 7.0]));

        let text = render_text(&tree);
        assert!(text.contains("5,7,;"));
    }
}
