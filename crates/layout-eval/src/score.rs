//! Confidence and compliance verdicts over an evaluated layout.

use crate::config::{LayoutConfig, ScoringConfig};
use crate::model::{LayoutBounds, LayoutResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The parts of a layout that scoring looks at, taken without copying nodes or edges.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LayoutFacts {
    pub overlap_count: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub bounds: LayoutBounds,
    pub processing_time_ms: f64,
}

impl From<&LayoutResult> for LayoutFacts {
    fn from(result: &LayoutResult) -> Self {
        Self {
            overlap_count: result.metrics.overlap_count,
            node_count: result.nodes.len(),
            edge_count: result.edges.len(),
            bounds: result.bounds,
            processing_time_ms: result.processing_time_ms,
        }
    }
}

/// Confidence in `[0, 1]` that `layout` is worth keeping.
///
/// Starts from `base_confidence`, rewards zero overlaps (or subtracts a per-overlap penalty),
/// adjusts for processing time, and rewards layouts with at least one node and one edge.
pub fn calculate_layout_confidence(
    layout: &LayoutResult,
    processing_time_ms: f64,
    scoring: &ScoringConfig,
) -> f64 {
    confidence_from_facts(&LayoutFacts::from(layout), processing_time_ms, scoring)
}

pub(crate) fn confidence_from_facts(
    facts: &LayoutFacts,
    processing_time_ms: f64,
    scoring: &ScoringConfig,
) -> f64 {
    let mut confidence = scoring.base_confidence;

    if facts.overlap_count == 0 {
        confidence += scoring.zero_overlap_bonus;
    } else {
        confidence -= scoring.overlap_penalty * facts.overlap_count as f64;
    }

    if processing_time_ms < scoring.fast_threshold_ms {
        confidence += scoring.fast_bonus;
    } else if processing_time_ms > scoring.slow_threshold_ms {
        confidence -= scoring.slow_penalty;
    }

    if facts.node_count > 0 && facts.edge_count > 0 {
        confidence += scoring.structure_bonus;
    }

    confidence.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Requirement {
    ZeroOverlaps,
    FastProcessing,
    HasValidStructure,
    WithinBounds,
}

impl Requirement {
    /// Every requirement, in reporting order.
    pub const ALL: [Requirement; 4] = [
        Requirement::ZeroOverlaps,
        Requirement::FastProcessing,
        Requirement::HasValidStructure,
        Requirement::WithinBounds,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Requirement::ZeroOverlaps => "zeroOverlaps",
            Requirement::FastProcessing => "fastProcessing",
            Requirement::HasValidStructure => "hasValidStructure",
            Requirement::WithinBounds => "withinBounds",
        }
    }

    fn is_met(self, facts: &LayoutFacts, config: &LayoutConfig) -> bool {
        match self {
            Requirement::ZeroOverlaps => facts.overlap_count == 0,
            Requirement::FastProcessing => {
                facts.processing_time_ms < config.scoring.compliance_time_budget_ms
            }
            Requirement::HasValidStructure => facts.node_count > 0,
            Requirement::WithinBounds => facts.bounds.fits_within(config.width, config.height),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub compliant: bool,
    pub compliance_score: f64,
    pub failed_requirements: Vec<Requirement>,
}

impl ComplianceReport {
    pub fn failed_names(&self) -> Vec<&'static str> {
        self.failed_requirements.iter().map(|r| r.name()).collect()
    }
}

/// Checks `result` against the four hard requirements.
///
/// A layout is compliant when the satisfied fraction reaches `min_compliance_score`, which by
/// default tolerates one failed requirement.
pub fn evaluate_compliance(result: &LayoutResult, config: &LayoutConfig) -> ComplianceReport {
    compliance_from_facts(&LayoutFacts::from(result), config)
}

pub(crate) fn compliance_from_facts(facts: &LayoutFacts, config: &LayoutConfig) -> ComplianceReport {
    let failed_requirements: Vec<Requirement> = Requirement::ALL
        .into_iter()
        .filter(|req| !req.is_met(facts, config))
        .collect();

    let total = Requirement::ALL.len();
    let passed = total - failed_requirements.len();
    let compliance_score = passed as f64 / total as f64;

    ComplianceReport {
        compliant: compliance_score >= config.scoring.min_compliance_score,
        compliance_score,
        failed_requirements,
    }
}
