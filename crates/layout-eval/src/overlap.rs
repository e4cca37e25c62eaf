use crate::geom::{PositionedNode, nodes_overlap};
use crate::model::OverlapPair;

/// Every unordered pair of overlapping nodes, in `(0,1), (0,2), .., (1,2), ..` order.
///
/// Quadratic in the node count; diagram layouts are small enough that no spatial index is used.
pub fn detect_all_overlaps(nodes: &[PositionedNode], spacing: f64) -> Vec<OverlapPair<'_>> {
    let mut out = Vec::new();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            if nodes_overlap(a, b, spacing) {
                out.push(OverlapPair { node1: a, node2: b });
            }
        }
    }
    out
}

pub fn count_overlaps(nodes: &[PositionedNode], spacing: f64) -> usize {
    detect_all_overlaps(nodes, spacing).len()
}
