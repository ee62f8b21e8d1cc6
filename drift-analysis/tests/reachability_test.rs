//! Forward reachability across a small, hand-built call graph spanning two
//! files (spec scenario: "reachability crosses file boundaries along an
//! import-resolved edge").

use drift_analysis::call_graph::types::{CallEdge, CallGraph, FunctionNode, Resolution};
use drift_analysis::graph::reachability::{ReachabilityEngine, TraversalDirection};
use drift_core::traits::CancellationToken;

fn function(file: &str, name: &str, line: u32) -> FunctionNode {
    FunctionNode {
        file: file.to_string(),
        name: name.to_string(),
        qualified_name: None,
        language: "typescript".to_string(),
        line,
        end_line: line + 10,
        is_entry_point: false,
        is_exported: true,
        signature_hash: 0,
        body_hash: 0,
    }
}

/// `handler.ts::handleRequest` -> `service.ts::processOrder` (import-resolved)
/// -> `service.ts::chargeCard` (same-file). A fourth, unrelated function in
/// a third file must not show up as reachable from `handleRequest`.
fn build_graph() -> CallGraph {
    let mut graph = CallGraph::new();
    let handler = graph.add_function(function("handler.ts", "handleRequest", 1));
    let process = graph.add_function(function("service.ts", "processOrder", 5));
    let charge = graph.add_function(function("service.ts", "chargeCard", 20));
    let unrelated = graph.add_function(function("unrelated.ts", "sendNewsletter", 1));
    let _ = unrelated;

    graph.add_edge(
        handler,
        process,
        CallEdge { resolution: Resolution::Import, confidence: Resolution::Import.default_confidence(), call_site_line: 2 },
    );
    graph.add_edge(
        process,
        charge,
        CallEdge { resolution: Resolution::SameFile, confidence: Resolution::SameFile.default_confidence(), call_site_line: 6 },
    );

    graph
}

#[test]
fn forward_reachability_crosses_file_boundaries() {
    let graph = build_graph();
    let engine = ReachabilityEngine::new(&graph);
    let token = CancellationToken::new();

    let source = graph.get_node("handler.ts::handleRequest").unwrap();
    let result = engine.reachable(source, TraversalDirection::Forward, &token);

    assert!(result.reachable_access().contains("service.ts::processOrder"));
    assert!(result.reachable_access().contains("service.ts::chargeCard"));
    assert!(!result.reachable_access().contains("unrelated.ts::sendNewsletter"));
    assert!(!result.reachable_access().contains("handler.ts::handleRequest"));
}

#[test]
fn inverse_reachability_from_a_leaf_finds_every_caller_up_the_chain() {
    let graph = build_graph();
    let engine = ReachabilityEngine::new(&graph);
    let token = CancellationToken::new();

    let source = graph.get_node("service.ts::chargeCard").unwrap();
    let result = engine.reachable(source, TraversalDirection::Inverse, &token);

    assert!(result.reachable_access().contains("service.ts::processOrder"));
    assert!(result.reachable_access().contains("handler.ts::handleRequest"));
    assert!(!result.reachable_access().contains("unrelated.ts::sendNewsletter"));
}
