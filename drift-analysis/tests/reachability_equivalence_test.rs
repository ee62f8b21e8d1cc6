//! Invariant B2: the in-memory `ReachabilityEngine` (walking a `CallGraph`
//! built in one pass) and the store-backed `StoreReachabilityEngine`
//! (walking `functions`/`call_edges` rows one frontier at a time) must
//! agree on the reachable set for the same graph, regardless of which one
//! answered the query.

use std::collections::HashMap;
use std::sync::Arc;

use drift_analysis::call_graph::types::{CallEdge, CallGraph, FunctionNode, Resolution};
use drift_analysis::graph::reachability::{ReachabilityEngine, TraversalDirection};
use drift_analysis::graph::store_engine::StoreReachabilityEngine;
use drift_core::traits::CancellationToken;
use drift_core::traits::storage::IDriftAnalysis;
use drift_core::traits::storage::drift_analysis::CallEdgeRow;
use drift_storage::DriftStorageEngine;

fn function(file: &str, name: &str, line: i64) -> FunctionNode {
    FunctionNode {
        file: file.to_string(),
        name: name.to_string(),
        qualified_name: None,
        language: "typescript".to_string(),
        line: line as u32,
        end_line: line as u32 + 10,
        is_entry_point: false,
        is_exported: true,
        signature_hash: 0,
        body_hash: 0,
    }
}

/// Same four-function, two-edge shape the other reachability tests use
/// (`handler.ts::handleRequest` -> `service.ts::processOrder` -> `service.ts::chargeCard`,
/// plus an unrelated, unreachable `sendNewsletter`), built once in-memory
/// and once against a real `DriftStorageEngine`.
#[test]
fn store_backed_and_in_memory_engines_agree_on_the_reachable_set() {
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

    let store = Arc::new(DriftStorageEngine::open_in_memory().unwrap());

    let rows = vec![
        row("handler.ts", "handleRequest", 1),
        row("service.ts", "processOrder", 5),
        row("service.ts", "chargeCard", 20),
        row("unrelated.ts", "sendNewsletter", 1),
    ];
    let ids = store.send_functions(rows);

    let id_of = |file: &str, name: &str| -> i64 {
        *ids.get(&(file.to_string(), name.to_string())).expect("function row inserted")
    };

    store
        .insert_call_edges(&[
            CallEdgeRow {
                caller_id: id_of("handler.ts", "handleRequest"),
                callee_id: Some(id_of("service.ts", "processOrder")),
                callee_name: "processOrder".to_string(),
                call_kind: "direct".to_string(),
                resolution: "import".to_string(),
                confidence: Resolution::Import.default_confidence(),
                call_site_line: 2,
            },
            CallEdgeRow {
                caller_id: id_of("service.ts", "processOrder"),
                callee_id: Some(id_of("service.ts", "chargeCard")),
                callee_name: "chargeCard".to_string(),
                call_kind: "direct".to_string(),
                resolution: "same_file".to_string(),
                confidence: Resolution::SameFile.default_confidence(),
                call_site_line: 6,
            },
        ])
        .unwrap();

    let key_of_id: HashMap<i64, String> = [
        (id_of("handler.ts", "handleRequest"), "handler.ts::handleRequest".to_string()),
        (id_of("service.ts", "processOrder"), "service.ts::processOrder".to_string()),
        (id_of("service.ts", "chargeCard"), "service.ts::chargeCard".to_string()),
        (id_of("unrelated.ts", "sendNewsletter"), "unrelated.ts::sendNewsletter".to_string()),
    ]
    .into_iter()
    .collect();

    let in_memory_engine = ReachabilityEngine::new(&graph);
    let token = CancellationToken::new();
    let in_memory_result = in_memory_engine.reachable(
        graph.get_node("handler.ts::handleRequest").unwrap(),
        TraversalDirection::Forward,
        &token,
    );

    let store_engine = StoreReachabilityEngine::new(store.clone());
    let store_result = store_engine
        .reachable(
            id_of("handler.ts", "handleRequest"),
            TraversalDirection::Forward,
            &|id| key_of_id.get(&id).cloned(),
            &token,
        )
        .unwrap();

    assert_eq!(in_memory_result.reachable_access(), store_result.reachable_access());
    assert!(in_memory_result.reachable_access().contains("service.ts::chargeCard"));
    assert!(!in_memory_result.reachable_access().contains("unrelated.ts::sendNewsletter"));
}

fn row(file: &str, name: &str, line: i64) -> (String, String, i64) {
    (file.to_string(), name.to_string(), line)
}

/// Small helper trait so the test reads linearly: insert a file's worth of
/// functions through the same batch path `CG.StreamingBuild` uses, and
/// hand back a lookup from `(file, name)` to assigned row id.
trait SendFunctions {
    fn send_functions(&self, rows: Vec<(String, String, i64)>) -> HashMap<(String, String), i64>;
}

impl SendFunctions for DriftStorageEngine {
    fn send_functions(&self, rows: Vec<(String, String, i64)>) -> HashMap<(String, String), i64> {
        use drift_storage::batch::commands::BatchCommand;
        use drift_storage::queries::functions::FunctionRecord;

        let records: Vec<FunctionRecord> = rows
            .iter()
            .map(|(file, name, line)| FunctionRecord {
                id: 0,
                file: file.clone(),
                name: name.clone(),
                qualified_name: None,
                language: "typescript".to_string(),
                line: *line,
                end_line: *line + 10,
                parameter_count: 0,
                return_type: None,
                is_exported: true,
                is_async: false,
                body_hash: None,
                signature_hash: None,
            })
            .collect();

        self.send_batch(BatchCommand::InsertFunctions { rows: records }).unwrap();
        self.flush_batch_sync().unwrap();

        rows.iter()
            .map(|(file, name, _)| {
                let row = self
                    .get_functions_by_file(file)
                    .unwrap()
                    .into_iter()
                    .find(|r| &r.name == name)
                    .expect("function row present after batch flush");
                ((file.clone(), name.clone()), row.id)
            })
            .collect()
    }
}
