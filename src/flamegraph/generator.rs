//! SVG flamegraph generation from a merged calling-context tree.
//!
//! Hand-rolled SVG, no external renderer: node widths come straight
//! from the tree's aggregated per-run samples, so the graph reflects
//! the same data the JSON profile carries.

use crate::tree::{CallNode, CallTree};
use crate::utils::error::FlamegraphError;
use log::info;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Merged Calling-Context Tree".to_string(),
            width: 1200,
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Total sample weight attributed to a node under `identifier`.
///
/// Falls back to the node's run-scoped weight when no measurement was
/// attached (e.g. a tree rendered before aggregation).
pub fn aggregated_weight(node: &CallNode, identifier: &str) -> f64 {
    node.vm_measurements
        .get(identifier)
        .map(|records| records.iter().flat_map(|r| r.samples.iter()).sum())
        .unwrap_or(node.weight)
}

/// Generate an SVG flamegraph from a merged tree under `identifier`
pub fn generate_flamegraph(
    tree: &CallTree,
    identifier: &str,
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    let root_weight = aggregated_weight(tree.node(tree.root()), identifier);
    if root_weight <= 0.0 {
        return Err(FlamegraphError::EmptyStacks);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating flamegraph for {} nodes", tree.len());

    let max_depth = tree
        .indices()
        .map(|idx| tree.node(idx).depth())
        .max()
        .unwrap_or(0);

    let width = config.width;
    let height_per_level = 20;
    let graph_height = (max_depth + 1) * height_per_level + 30;
    let total_height = graph_height + 10;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, total_height, width, total_height
    ));
    svg.push_str(
        r#"<style>.func { font: 12px sans-serif; } .func:hover { stroke: black; stroke-width: 1; cursor: pointer; opacity: 0.9; }</style>"#,
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="20" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2, config.title
    ));

    render_node(
        tree,
        tree.root(),
        identifier,
        0,
        0.0,
        width as f64,
        height_per_level,
        &mut svg,
    );

    svg.push_str("</svg>");

    info!("Flamegraph generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

#[allow(clippy::too_many_arguments)]
fn render_node(
    tree: &CallTree,
    idx: usize,
    identifier: &str,
    level: usize,
    x: f64,
    w: f64,
    h: usize,
    out: &mut String,
) {
    if w < 0.5 {
        return; // Don't render invisible blocks
    }

    let node = tree.node(idx);
    let weight = aggregated_weight(node, identifier);
    let y = 30 + level * h;

    out.push_str(&format!(
        r#"<rect x="{:.2}" y="{}" width="{:.2}" height="{}" fill="{}" class="func"><title>{} ({} samples)</title></rect>"#,
        x,
        y,
        w,
        h,
        node_color(&node.label),
        escape_xml(&node.label),
        weight
    ));

    if w > 35.0 {
        let char_width = 7.0;
        let max_chars = (w / char_width) as usize;
        let display_name = truncate_label(&node.label, max_chars);
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{}" dx="4" dy="14" font-size="12" fill="white" pointer-events="none">{}</text>"#,
            x,
            y,
            escape_xml(&display_name)
        ));
    }

    // Children share the parent's horizontal extent proportionally to
    // their own aggregated weight.
    let child_total: f64 = node
        .children
        .iter()
        .map(|&c| aggregated_weight(tree.node(c), identifier))
        .sum();
    if child_total <= 0.0 {
        return;
    }
    let scale = w / child_total.max(weight);
    let mut child_x = x;
    for &child in &node.children {
        let child_w = aggregated_weight(tree.node(child), identifier) * scale;
        render_node(tree, child, identifier, level + 1, child_x, child_w, h, out);
        child_x += child_w;
    }
}

// Labels are arbitrary UTF-8 from the sample files, so truncation must
// count chars, never byte-slice.
fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars && max_chars > 3 {
        let kept: String = label.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    } else {
        label.to_string()
    }
}

fn node_color(label: &str) -> &'static str {
    // Stable per-label pick from a warm palette
    const PALETTE: &[&str] = &[
        "rgb(215, 85, 50)",
        "rgb(230, 120, 40)",
        "rgb(240, 150, 35)",
        "rgb(200, 100, 70)",
        "rgb(225, 135, 55)",
    ];
    let hash: usize = label.bytes().map(usize::from).sum();
    PALETTE[hash % PALETTE.len()]
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::VmMeasurement;

    #[test]
    fn test_aggregated_weight_prefers_measurements() {
        let mut tree = CallTree::new("root", 3.0);
        tree.node_mut(0)
            .add_vm_measurement("rev1", VmMeasurement::new(0, vec![5.0]));
        tree.node_mut(0)
            .add_vm_measurement("rev1", VmMeasurement::new(1, vec![7.0]));

        assert_eq!(aggregated_weight(tree.node(0), "rev1"), 12.0);
        assert_eq!(aggregated_weight(tree.node(0), "rev2"), 3.0);
    }

    #[test]
    fn test_generate_flamegraph_contains_labels() {
        let mut tree = CallTree::new("9 testcase(...)", 10.0);
        tree.add_child(tree.root(), "bar", 6.0);

        let svg = generate_flamegraph(&tree, "rev1", None).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("9 testcase(...)"));
        assert!(svg.contains("bar"));
    }

    #[test]
    fn test_multibyte_labels_truncate_on_char_boundaries() {
        let mut tree = CallTree::new("9 ääääääääääääääääääää(...)", 10.0);
        tree.add_child(tree.root(), "ööööööööööööööööööööööööö", 6.0);

        let config = FlamegraphConfig::new().with_width(100);
        let svg = generate_flamegraph(&tree, "rev1", Some(&config)).unwrap();
        assert!(svg.contains("..."));
    }

    #[test]
    fn test_truncate_label_counts_chars_not_bytes() {
        assert_eq!(truncate_label("ääääääääää", 7), "ääää...");
        assert_eq!(truncate_label("short", 10), "short");
        // Tiny budgets keep the full label rather than eating it whole.
        assert_eq!(truncate_label("ääääääääää", 3), "ääääääääää");
    }

    #[test]
    fn test_zero_weight_tree_is_rejected() {
        let tree = CallTree::new("root", 0.0);
        let result = generate_flamegraph(&tree, "rev1", None);
        assert!(matches!(result, Err(FlamegraphError::EmptyStacks)));
    }
}
