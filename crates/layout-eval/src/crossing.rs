//! Edge-crossing detection.
//!
//! Each edge is reduced to the straight segment between its endpoint node centers. Two edges
//! cross when those segments intersect, unless the edges already meet at a shared node.

use crate::geom::{Point, PositionedNode, node_center};
use crate::model::{EdgeCrossing, LayoutEdge};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Turn direction of `p -> q -> r`. Cross products within `tolerance` of zero are collinear;
/// an exact zero is collinear even when `tolerance` is `0`.
pub fn orientation(p: Point, q: Point, r: Point, tolerance: f64) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val.abs() <= tolerance {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether `q` lies inside the bounding rectangle of `p` and `r`.
///
/// Only meaningful once `p`, `q` and `r` are known to be collinear.
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point, tolerance: f64) -> bool {
    let o1 = orientation(p1, p2, p3, tolerance);
    let o2 = orientation(p1, p2, p4, tolerance);
    let o3 = orientation(p3, p4, p1, tolerance);
    let o4 = orientation(p3, p4, p2, tolerance);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    use Orientation::Collinear;
    (o1 == Collinear && on_segment(p1, p3, p2))
        || (o2 == Collinear && on_segment(p1, p4, p2))
        || (o3 == Collinear && on_segment(p3, p1, p4))
        || (o4 == Collinear && on_segment(p3, p2, p4))
}

#[derive(Debug, Clone, Copy)]
struct Segment<'a> {
    index: usize,
    edge: &'a LayoutEdge,
    start: Point,
    end: Point,
}

fn edge_segments<'a>(nodes: &[PositionedNode], edges: &'a [LayoutEdge]) -> Vec<Segment<'a>> {
    let centers: FxHashMap<&str, Point> = nodes
        .iter()
        .map(|n| (n.id.as_str(), node_center(n)))
        .collect();

    edges
        .iter()
        .enumerate()
        .filter_map(|(index, edge)| {
            let (Some(&start), Some(&end)) = (
                centers.get(edge.from.as_str()),
                centers.get(edge.to.as_str()),
            ) else {
                tracing::debug!(
                    from = %edge.from,
                    to = %edge.to,
                    "skipping edge with unknown endpoint"
                );
                return None;
            };
            Some(Segment {
                index,
                edge,
                start,
                end,
            })
        })
        .collect()
}

/// Pairs of non-adjacent edges whose segments intersect, ordered by `(first, second)`.
///
/// Edges whose endpoints are not among `nodes` are ignored.
pub fn detect_edge_crossing_pairs(
    nodes: &[PositionedNode],
    edges: &[LayoutEdge],
    tolerance: f64,
) -> Vec<EdgeCrossing> {
    if edges.len() < 2 {
        return Vec::new();
    }

    let segments = edge_segments(nodes, edges);
    let mut out = Vec::new();
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            if a.edge.shares_endpoint(b.edge) {
                continue;
            }
            if segments_intersect(a.start, a.end, b.start, b.end, tolerance) {
                out.push(EdgeCrossing {
                    first: a.index,
                    second: b.index,
                });
            }
        }
    }
    out
}

pub fn detect_edge_crossings(
    nodes: &[PositionedNode],
    edges: &[LayoutEdge],
    tolerance: f64,
) -> usize {
    detect_edge_crossing_pairs(nodes, edges, tolerance).len()
}
