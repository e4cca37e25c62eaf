//! Geometric primitives shared by the detectors.
//!
//! Nodes are axis-aligned rectangles anchored at their top-left corner. Everything else in the
//! crate (overlap tests, edge segments, spacing and balance) is expressed through the helpers
//! in this module.

use serde::{Deserialize, Serialize};

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Rect = euclid::Box2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// A rectangular diagram node as produced by an upstream layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(alias = "width")]
    pub w: f64,
    #[serde(alias = "height")]
    pub h: f64,
}

impl PositionedNode {
    pub fn new(id: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
        }
    }

    /// Builds a node of the given size whose center sits at `(cx, cy)`.
    pub fn centered(id: impl Into<String>, cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self::new(id, cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn has_area(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }
}

pub fn node_center(node: &PositionedNode) -> Point {
    point(node.x + node.w / 2.0, node.y + node.h / 2.0)
}

pub fn node_distance(a: &PositionedNode, b: &PositionedNode) -> f64 {
    node_center(a).distance_to(node_center(b))
}

/// The node rectangle grown by `min_spacing / 2` on every side.
pub fn padded_box(node: &PositionedNode, min_spacing: f64) -> Rect {
    let pad = min_spacing / 2.0;
    Rect::new(
        point(node.x - pad, node.y - pad),
        point(node.x + node.w + pad, node.y + node.h + pad),
    )
}

/// Returns `true` when the padded boxes of `a` and `b` intersect.
///
/// Boxes that merely touch do not overlap, so two nodes separated by exactly `min_spacing` pass.
/// Nodes without area never overlap anything.
pub fn nodes_overlap(a: &PositionedNode, b: &PositionedNode, min_spacing: f64) -> bool {
    if !a.has_area() || !b.has_area() {
        return false;
    }
    padded_box(a, min_spacing).intersects(&padded_box(b, min_spacing))
}
