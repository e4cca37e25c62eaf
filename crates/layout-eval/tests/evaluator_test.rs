use layout_eval::{
    EdgeCrossing, Error, Evaluator, LayoutBounds, LayoutConfig, LayoutEdge, PositionedNode,
    Requirement,
};

fn evaluator() -> Evaluator {
    Evaluator::new(LayoutConfig::new(20.0, 800.0, 600.0)).unwrap()
}

fn pipeline() -> (Vec<PositionedNode>, Vec<LayoutEdge>) {
    let nodes = vec![
        PositionedNode::new("intro", 0.0, 0.0, 120.0, 60.0),
        PositionedNode::new("problem", 160.0, 0.0, 120.0, 60.0),
        PositionedNode::new("idea", 320.0, 0.0, 120.0, 60.0),
        PositionedNode::new("demo", 160.0, 120.0, 120.0, 60.0),
        PositionedNode::new("outro", 320.0, 120.0, 120.0, 60.0),
    ];
    let edges = vec![
        LayoutEdge::new("intro", "problem"),
        LayoutEdge::new("problem", "idea"),
        LayoutEdge::new("problem", "demo").with_label("shows"),
        LayoutEdge::new("demo", "outro"),
    ];
    (nodes, edges)
}

#[test]
fn evaluator_rejects_invalid_config() {
    let err = Evaluator::new(LayoutConfig::new(-1.0, 800.0, 600.0)).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidConfig {
            field: "nodeSeparation",
            ..
        }
    ));
    assert!(Evaluator::new(LayoutConfig::new(10.0, 0.0, 600.0)).is_err());
    assert!(Evaluator::new(LayoutConfig::new(f64::NAN, 800.0, 600.0)).is_err());
}

#[test]
fn evaluator_uses_configured_separation_unless_overridden() {
    let ev = evaluator();
    let nodes = [
        PositionedNode::new("a", 0.0, 0.0, 100.0, 50.0),
        PositionedNode::new("b", 110.0, 0.0, 100.0, 50.0),
    ];
    assert!(ev.nodes_overlap(&nodes[0], &nodes[1]));
    assert_eq!(ev.count_overlaps(&nodes), 1);
    assert_eq!(ev.detect_all_overlaps(&nodes, None).len(), 1);
    assert!(ev.detect_all_overlaps(&nodes, Some(10.0)).is_empty());
}

#[test]
fn evaluate_accepts_a_clean_layout() {
    let ev = evaluator();
    let (nodes, edges) = pipeline();
    let evaluation = ev.evaluate(&nodes, &edges, 1500.0);

    assert_eq!(evaluation.metrics.overlap_count, 0);
    assert_eq!(evaluation.metrics.edge_crossings, 0);
    assert_eq!(evaluation.metrics.total_area, 5.0 * 7200.0);
    assert_eq!(evaluation.bounds, LayoutBounds::new(440.0, 180.0));
    assert_eq!(evaluation.confidence, 1.0);
    assert!(evaluation.compliance.compliant);
    assert_eq!(evaluation.compliance.compliance_score, 1.0);
    assert!(evaluation.overlaps.is_empty());
    assert!(ev.accepts(&evaluation));
}

#[test]
fn evaluate_reports_overlaps_and_crossings() {
    let ev = evaluator();
    let (mut nodes, mut edges) = pipeline();
    // Drop a node on top of "idea" and route two edges across the diagram.
    nodes.push(PositionedNode::new("aside", 330.0, 10.0, 40.0, 40.0));
    edges.push(LayoutEdge::new("intro", "outro"));
    edges.push(LayoutEdge::new("idea", "demo"));

    let evaluation = ev.evaluate(&nodes, &edges, 6000.0);
    assert_eq!(evaluation.metrics.overlap_count, 1);
    assert_eq!(evaluation.overlaps[0].node1, "idea");
    assert_eq!(evaluation.overlaps[0].node2, "aside");
    // intro->outro cuts problem->demo and idea->demo.
    assert_eq!(
        evaluation.crossings,
        vec![
            EdgeCrossing { first: 2, second: 4 },
            EdgeCrossing { first: 4, second: 5 },
        ]
    );
    assert_eq!(evaluation.metrics.edge_crossings, 2);
    assert_eq!(
        evaluation.compliance.failed_requirements,
        vec![Requirement::ZeroOverlaps, Requirement::FastProcessing]
    );
    assert!(!ev.accepts(&evaluation));
}

#[test]
fn evaluate_result_trusts_reported_bounds() {
    let ev = evaluator();
    let (nodes, edges) = pipeline();
    let mut result = ev.build_result(&nodes, &edges, 1000.0);
    assert_eq!(result.bounds, LayoutBounds::new(440.0, 180.0));
    assert_eq!(result.metrics, ev.calculate_layout_metrics(&nodes, &edges));

    result.bounds = LayoutBounds::new(1024.0, 768.0);
    let evaluation = ev.evaluate_result(&result);
    assert_eq!(
        evaluation.compliance.failed_requirements,
        vec![Requirement::WithinBounds]
    );
    assert!(evaluation.compliance.compliant);
    assert_eq!(ev.evaluate_compliance(&result), evaluation.compliance);
    assert_eq!(
        ev.calculate_layout_confidence(&result, 1000.0),
        evaluation.confidence
    );
}

#[test]
fn evaluate_is_idempotent() {
    let ev = evaluator();
    let (nodes, edges) = pipeline();
    assert_eq!(
        ev.evaluate(&nodes, &edges, 2500.0),
        ev.evaluate(&nodes, &edges, 2500.0)
    );
}

#[test]
fn evaluate_handles_empty_input() {
    let ev = evaluator();
    let evaluation = ev.evaluate(&[], &[], 0.0);
    assert_eq!(evaluation.metrics.layout_balance, 1.0);
    assert_eq!(evaluation.bounds, LayoutBounds::default());
    assert_eq!(
        evaluation.compliance.failed_requirements,
        vec![Requirement::HasValidStructure]
    );
}

#[test]
fn evaluator_can_be_shared_across_threads() {
    let ev = evaluator();
    let (nodes, edges) = pipeline();
    let expected = ev.evaluate(&nodes, &edges, 1200.0);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| ev.evaluate(&nodes, &edges, 1200.0)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn evaluation_serializes_with_camel_case_fields() {
    let ev = evaluator();
    let (nodes, edges) = pipeline();
    let value = serde_json::to_value(ev.evaluate(&nodes, &edges, 1500.0)).unwrap();
    assert_eq!(value["metrics"]["overlapCount"], 0);
    assert_eq!(value["compliance"]["complianceScore"], 1.0);
    assert_eq!(value["processingTimeMs"], 1500.0);
}

#[test]
fn evaluate_agrees_with_the_standalone_operations() {
    let ev = evaluator();
    let (mut nodes, mut edges) = pipeline();
    nodes.push(PositionedNode::new("aside", 330.0, 10.0, 40.0, 40.0));
    edges.push(LayoutEdge::new("intro", "outro"));
    edges.push(LayoutEdge::new("ghost", "intro"));

    for time in [500.0, 3000.0, 9000.0] {
        let evaluation = ev.evaluate(&nodes, &edges, time);
        let result = ev.build_result(&nodes, &edges, time);
        assert_eq!(evaluation.metrics, result.metrics);
        assert_eq!(evaluation.metrics, ev.calculate_layout_metrics(&nodes, &edges));
        assert_eq!(evaluation.bounds, result.bounds);
        assert_eq!(
            evaluation.confidence,
            ev.calculate_layout_confidence(&result, time)
        );
        assert_eq!(evaluation.compliance, ev.evaluate_compliance(&result));
    }
}
