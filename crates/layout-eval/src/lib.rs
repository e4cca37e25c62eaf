#![forbid(unsafe_code)]

//! Geometric quality checks for positioned diagram layouts.
//!
//! A layout generator hands over rectangular nodes and the edges between them; this crate
//! counts overlapping node pairs and crossing edges, aggregates spacing and balance metrics,
//! and turns them into a confidence score and a compliance verdict. The caller decides
//! whether to keep the layout or to try another one.
//!
//! All evaluation functions are pure and total: malformed input (unknown edge endpoints,
//! empty layouts, zero-area nodes) degrades to neutral values instead of errors.

pub mod config;
pub mod crossing;
pub mod error;
pub mod evaluator;
pub mod geom;
pub mod metrics;
pub mod model;
pub mod overlap;
pub mod score;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{LayoutConfig, ScoringConfig};
pub use crossing::{
    Orientation, detect_edge_crossing_pairs, detect_edge_crossings, on_segment, orientation,
    segments_intersect,
};
pub use error::{Error, Result};
pub use evaluator::{Evaluation, Evaluator, OverlapIds};
pub use geom::{Point, PositionedNode, node_center, node_distance, nodes_overlap, padded_box};
pub use metrics::{average_spacing, calculate_layout_metrics, layout_balance, total_area};
pub use model::{EdgeCrossing, LayoutBounds, LayoutEdge, LayoutMetrics, LayoutResult, OverlapPair};
pub use overlap::{count_overlaps, detect_all_overlaps};
pub use score::{ComplianceReport, Requirement, calculate_layout_confidence, evaluate_compliance};
