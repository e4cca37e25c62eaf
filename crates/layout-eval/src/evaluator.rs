use crate::config::LayoutConfig;
use crate::crossing::{detect_edge_crossing_pairs, detect_edge_crossings};
use crate::error::Result;
use crate::geom::{PositionedNode, nodes_overlap};
use crate::metrics::{calculate_layout_metrics, metrics_with_counts};
use crate::model::{EdgeCrossing, LayoutBounds, LayoutEdge, LayoutMetrics, LayoutResult, OverlapPair};
use crate::overlap::{count_overlaps, detect_all_overlaps};
use crate::score::{
    ComplianceReport, LayoutFacts, calculate_layout_confidence, compliance_from_facts,
    confidence_from_facts, evaluate_compliance,
};
use serde::{Deserialize, Serialize};

/// Ids of two overlapping nodes, as reported in an [`Evaluation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapIds {
    pub node1: String,
    pub node2: String,
}

impl From<OverlapPair<'_>> for OverlapIds {
    fn from(pair: OverlapPair<'_>) -> Self {
        Self {
            node1: pair.node1.id.clone(),
            node2: pair.node2.id.clone(),
        }
    }
}

/// Everything the evaluator knows about one candidate layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub metrics: LayoutMetrics,
    pub bounds: LayoutBounds,
    pub processing_time_ms: f64,
    pub confidence: f64,
    pub compliance: ComplianceReport,
    pub overlaps: Vec<OverlapIds>,
    pub crossings: Vec<EdgeCrossing>,
}

/// Layout quality evaluator bound to a validated, read-only [`LayoutConfig`].
///
/// Holds no other state, so one instance can be shared across threads and every call is
/// idempotent.
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: LayoutConfig,
}

impl Evaluator {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn nodes_overlap(&self, a: &PositionedNode, b: &PositionedNode) -> bool {
        nodes_overlap(a, b, self.config.node_separation)
    }

    /// Overlapping pairs using `spacing`, or the configured node separation when `None`.
    pub fn detect_all_overlaps<'a>(
        &self,
        nodes: &'a [PositionedNode],
        spacing: Option<f64>,
    ) -> Vec<OverlapPair<'a>> {
        detect_all_overlaps(nodes, spacing.unwrap_or(self.config.node_separation))
    }

    pub fn count_overlaps(&self, nodes: &[PositionedNode]) -> usize {
        count_overlaps(nodes, self.config.node_separation)
    }

    pub fn detect_edge_crossings(&self, nodes: &[PositionedNode], edges: &[LayoutEdge]) -> usize {
        detect_edge_crossings(nodes, edges, self.config.scoring.collinear_tolerance)
    }

    pub fn detect_edge_crossing_pairs(
        &self,
        nodes: &[PositionedNode],
        edges: &[LayoutEdge],
    ) -> Vec<EdgeCrossing> {
        detect_edge_crossing_pairs(nodes, edges, self.config.scoring.collinear_tolerance)
    }

    pub fn calculate_layout_metrics(
        &self,
        nodes: &[PositionedNode],
        edges: &[LayoutEdge],
    ) -> LayoutMetrics {
        calculate_layout_metrics(nodes, edges, &self.config)
    }

    /// Packages a candidate layout with node-derived bounds and fresh metrics.
    pub fn build_result(
        &self,
        nodes: &[PositionedNode],
        edges: &[LayoutEdge],
        processing_time_ms: f64,
    ) -> LayoutResult {
        LayoutResult {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
            bounds: LayoutBounds::from_nodes(nodes),
            metrics: self.calculate_layout_metrics(nodes, edges),
            processing_time_ms,
        }
    }

    pub fn calculate_layout_confidence(&self, layout: &LayoutResult, processing_time_ms: f64) -> f64 {
        calculate_layout_confidence(layout, processing_time_ms, &self.config.scoring)
    }

    pub fn evaluate_compliance(&self, result: &LayoutResult) -> ComplianceReport {
        evaluate_compliance(result, &self.config)
    }

    /// Runs every check over a candidate layout, deriving its bounds from the nodes.
    pub fn evaluate(
        &self,
        nodes: &[PositionedNode],
        edges: &[LayoutEdge],
        processing_time_ms: f64,
    ) -> Evaluation {
        self.assemble(
            nodes,
            edges,
            LayoutBounds::from_nodes(nodes),
            processing_time_ms,
        )
    }

    /// Like [`Evaluator::evaluate`], but trusts the bounds reported by the layout generator.
    /// Metrics stored on `result` are recomputed.
    pub fn evaluate_result(&self, result: &LayoutResult) -> Evaluation {
        self.assemble(
            &result.nodes,
            &result.edges,
            result.bounds,
            result.processing_time_ms,
        )
    }

    pub fn accepts(&self, evaluation: &Evaluation) -> bool {
        evaluation.compliance.compliant
    }

    fn assemble(
        &self,
        nodes: &[PositionedNode],
        edges: &[LayoutEdge],
        bounds: LayoutBounds,
        processing_time_ms: f64,
    ) -> Evaluation {
        let overlaps = detect_all_overlaps(nodes, self.config.node_separation);
        let crossings =
            detect_edge_crossing_pairs(nodes, edges, self.config.scoring.collinear_tolerance);
        let metrics = metrics_with_counts(nodes, overlaps.len(), crossings.len(), &self.config);

        let facts = LayoutFacts {
            overlap_count: metrics.overlap_count,
            node_count: nodes.len(),
            edge_count: edges.len(),
            bounds,
            processing_time_ms,
        };
        let confidence = confidence_from_facts(&facts, processing_time_ms, &self.config.scoring);
        let compliance = compliance_from_facts(&facts, &self.config);

        tracing::trace!(
            nodes = nodes.len(),
            edges = edges.len(),
            overlaps = metrics.overlap_count,
            crossings = metrics.edge_crossings,
            confidence,
            compliant = compliance.compliant,
            "evaluated layout"
        );

        Evaluation {
            overlaps: overlaps.into_iter().map(OverlapIds::from).collect(),
            crossings,
            metrics,
            bounds,
            processing_time_ms,
            confidence,
            compliance,
        }
    }
}
