use crate::geom::PositionedNode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LayoutEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether the two edges meet at a node (in either direction).
    pub fn shares_endpoint(&self, other: &LayoutEdge) -> bool {
        self.from == other.from
            || self.from == other.to
            || self.to == other.from
            || self.to == other.to
    }
}

/// Two nodes whose padded boxes intersect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlapPair<'a> {
    pub node1: &'a PositionedNode,
    pub node2: &'a PositionedNode,
}

/// Indices (into the evaluated edge slice) of two edges whose segments intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCrossing {
    pub first: usize,
    pub second: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetrics {
    pub overlap_count: usize,
    pub edge_crossings: usize,
    pub total_area: f64,
    pub node_spacing: f64,
    pub layout_balance: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            overlap_count: 0,
            edge_crossings: 0,
            total_area: 0.0,
            node_spacing: 0.0,
            layout_balance: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutBounds {
    pub width: f64,
    pub height: f64,
}

impl LayoutBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent of the union of all node rectangles; zero for an empty set.
    pub fn from_nodes(nodes: &[PositionedNode]) -> Self {
        let mut it = nodes.iter();
        let Some(first) = it.next() else {
            return Self::default();
        };
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x + first.w, first.y + first.h);
        for n in it {
            min_x = min_x.min(n.x);
            min_y = min_y.min(n.y);
            max_x = max_x.max(n.x + n.w);
            max_y = max_y.max(n.y + n.h);
        }
        Self {
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.width <= width && self.height <= height
    }
}

/// A candidate layout as handed over by the layout generator, together with its metrics and
/// the time it took to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub nodes: Vec<PositionedNode>,
    #[serde(default)]
    pub edges: Vec<LayoutEdge>,
    pub bounds: LayoutBounds,
    #[serde(default)]
    pub metrics: LayoutMetrics,
    #[serde(default)]
    pub processing_time_ms: f64,
}

impl LayoutResult {
    pub fn has_structure(&self) -> bool {
        !self.nodes.is_empty() && !self.edges.is_empty()
    }
}
