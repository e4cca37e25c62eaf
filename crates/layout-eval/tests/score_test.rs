use layout_eval::{
    LayoutBounds, LayoutConfig, LayoutEdge, LayoutMetrics, LayoutResult, PositionedNode,
    Requirement, ScoringConfig, calculate_layout_confidence, evaluate_compliance,
};

fn chain(node_count: usize) -> (Vec<PositionedNode>, Vec<LayoutEdge>) {
    let nodes: Vec<PositionedNode> = (0..node_count)
        .map(|i| PositionedNode::new(format!("n{i}"), i as f64 * 120.0, 0.0, 100.0, 40.0))
        .collect();
    let edges = nodes
        .windows(2)
        .map(|w| LayoutEdge::new(w[0].id.clone(), w[1].id.clone()))
        .collect();
    (nodes, edges)
}

fn layout(overlap_count: usize, processing_time_ms: f64) -> LayoutResult {
    let (nodes, edges) = chain(5);
    LayoutResult {
        nodes,
        edges,
        bounds: LayoutBounds::new(580.0, 40.0),
        metrics: LayoutMetrics {
            overlap_count,
            ..Default::default()
        },
        processing_time_ms,
    }
}

fn config() -> LayoutConfig {
    LayoutConfig::new(20.0, 800.0, 600.0)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn confidence_rewards_a_clean_fast_structured_layout() {
    let scoring = ScoringConfig::default();
    let c = calculate_layout_confidence(&layout(0, 1500.0), 1500.0, &scoring);
    assert_eq!(c, 1.0);
}

#[test]
fn confidence_applies_each_adjustment() {
    let scoring = ScoringConfig::default();

    // 0.8 + 0.15 (no overlaps) + 0.05 (structure); mid-range time is neutral.
    let c = calculate_layout_confidence(&layout(0, 3000.0), 3000.0, &scoring);
    assert!(approx_eq(c, 1.0), "{c}");

    // 0.8 - 0.2 (two overlaps) + 0.05 (fast) + 0.05 (structure)
    let c = calculate_layout_confidence(&layout(2, 100.0), 100.0, &scoring);
    assert!(approx_eq(c, 0.7), "{c}");

    // 0.8 - 0.1 (one overlap) - 0.1 (slow) + 0.05 (structure)
    let c = calculate_layout_confidence(&layout(1, 7000.0), 7000.0, &scoring);
    assert!(approx_eq(c, 0.65), "{c}");
}

#[test]
fn confidence_skips_the_structure_bonus_without_edges() {
    let scoring = ScoringConfig::default();
    let mut l = layout(0, 3000.0);
    l.edges.clear();
    let c = calculate_layout_confidence(&l, 3000.0, &scoring);
    assert!(approx_eq(c, 0.95), "{c}");
}

#[test]
fn confidence_is_clamped_to_the_unit_interval() {
    let scoring = ScoringConfig::default();
    let c = calculate_layout_confidence(&layout(20, 10_000.0), 10_000.0, &scoring);
    assert_eq!(c, 0.0);

    let empty = LayoutResult {
        nodes: Vec::new(),
        edges: Vec::new(),
        bounds: LayoutBounds::default(),
        metrics: LayoutMetrics::default(),
        processing_time_ms: 0.0,
    };
    for t in [0.0, 1999.0, 2000.0, 5000.0, 5001.0, 1e9] {
        let c = calculate_layout_confidence(&empty, t, &scoring);
        assert!((0.0..=1.0).contains(&c), "t={t} c={c}");
    }
}

#[test]
fn compliance_passes_when_every_requirement_holds() {
    let report = evaluate_compliance(&layout(0, 1500.0), &config());
    assert!(report.compliant);
    assert_eq!(report.compliance_score, 1.0);
    assert!(report.failed_requirements.is_empty());
}

#[test]
fn compliance_lists_failed_requirements_in_order() {
    let report = evaluate_compliance(&layout(2, 6000.0), &config());
    assert!(!report.compliant);
    assert_eq!(report.compliance_score, 0.5);
    assert_eq!(
        report.failed_requirements,
        vec![Requirement::ZeroOverlaps, Requirement::FastProcessing]
    );
    assert_eq!(report.failed_names(), vec!["zeroOverlaps", "fastProcessing"]);
}

#[test]
fn compliance_tolerates_a_single_failure() {
    let report = evaluate_compliance(&layout(3, 1000.0), &config());
    assert!(report.compliant);
    assert_eq!(report.compliance_score, 0.75);
    assert_eq!(report.failed_requirements, vec![Requirement::ZeroOverlaps]);
}

#[test]
fn compliance_checks_bounds_against_the_canvas() {
    let mut l = layout(0, 1000.0);
    l.bounds = LayoutBounds::new(801.0, 100.0);
    let report = evaluate_compliance(&l, &config());
    assert_eq!(report.failed_requirements, vec![Requirement::WithinBounds]);

    l.bounds = LayoutBounds::new(800.0, 600.0);
    assert!(evaluate_compliance(&l, &config()).failed_requirements.is_empty());
}

#[test]
fn compliance_fails_an_empty_layout_structure() {
    let empty = LayoutResult {
        nodes: Vec::new(),
        edges: Vec::new(),
        bounds: LayoutBounds::default(),
        metrics: LayoutMetrics::default(),
        processing_time_ms: 5000.0,
    };
    let report = evaluate_compliance(&empty, &config());
    assert_eq!(
        report.failed_requirements,
        vec![Requirement::FastProcessing, Requirement::HasValidStructure]
    );
    assert!(!report.compliant);
}

#[test]
fn requirement_names_serialize_in_camel_case() {
    let json = serde_json::to_string(&Requirement::ALL).unwrap();
    assert_eq!(
        json,
        r#"["zeroOverlaps","fastProcessing","hasValidStructure","withinBounds"]"#
    );
    for r in Requirement::ALL {
        assert_eq!(r.to_string(), r.name());
    }
}
