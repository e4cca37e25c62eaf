use crate::config::LayoutConfig;
use crate::crossing::detect_edge_crossings;
use crate::geom::{PositionedNode, node_center, node_distance, point};
use crate::model::{LayoutEdge, LayoutMetrics};
use crate::overlap::count_overlaps;

pub fn calculate_layout_metrics(
    nodes: &[PositionedNode],
    edges: &[LayoutEdge],
    config: &LayoutConfig,
) -> LayoutMetrics {
    metrics_with_counts(
        nodes,
        count_overlaps(nodes, config.node_separation),
        detect_edge_crossings(nodes, edges, config.scoring.collinear_tolerance),
        config,
    )
}

/// Completes a metrics record around overlap and crossing counts computed elsewhere.
pub(crate) fn metrics_with_counts(
    nodes: &[PositionedNode],
    overlap_count: usize,
    edge_crossings: usize,
    config: &LayoutConfig,
) -> LayoutMetrics {
    LayoutMetrics {
        overlap_count,
        edge_crossings,
        total_area: total_area(nodes),
        node_spacing: average_spacing(nodes),
        layout_balance: layout_balance(nodes, config.scoring.balance_variance_scale),
    }
}

pub fn total_area(nodes: &[PositionedNode]) -> f64 {
    nodes.iter().map(PositionedNode::area).sum()
}

/// Mean center-to-center distance over all unordered node pairs.
pub fn average_spacing(nodes: &[PositionedNode]) -> f64 {
    if nodes.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    let mut pairs: usize = 0;
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            total += node_distance(a, b);
            pairs += 1;
        }
    }
    total / pairs as f64
}

/// `1 - variance / variance_scale`, floored at zero, where `variance` is the mean squared
/// distance of node centers from their centroid. An empty layout is perfectly balanced.
pub fn layout_balance(nodes: &[PositionedNode], variance_scale: f64) -> f64 {
    if nodes.is_empty() {
        return 1.0;
    }
    let n = nodes.len() as f64;
    let (sx, sy) = nodes.iter().map(node_center).fold((0.0, 0.0), |(sx, sy), c| {
        (sx + c.x, sy + c.y)
    });
    let centroid = point(sx / n, sy / n);
    let variance = nodes
        .iter()
        .map(|node| (node_center(node) - centroid).square_length())
        .sum::<f64>()
        / n;
    (1.0 - variance / variance_scale).max(0.0)
}
