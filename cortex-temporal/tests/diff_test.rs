//! Integration tests for `query::diff`: identity, and the sign convention
//! a reversed query (`time_a > time_b`) must still honor.

use chrono::{Duration, Utc};
use cortex_core::config::StorageConfig;
use cortex_core::memory::*;
use cortex_core::models::{DiffScope, TemporalDiffQuery};
use cortex_storage::engine::StorageEngine;
use cortex_storage::queries::memory_crud;

fn engine() -> StorageEngine {
    StorageEngine::open_in_memory(&StorageConfig::default()).unwrap()
}

fn memory(id: &str, confidence: f64, recorded: chrono::DateTime<Utc>) -> BaseMemory {
    let content = TypedContent::Episodic(EpisodicContent {
        interaction: "diff test".to_string(),
        context: "diff test".to_string(),
        outcome: None,
    });
    BaseMemory {
        id: id.to_string(),
        memory_type: MemoryType::Episodic,
        content,
        summary: "diff test".to_string(),
        transaction_time: recorded,
        valid_time: recorded,
        valid_until: None,
        confidence: Confidence::new(confidence),
        importance: Importance::Medium,
        last_accessed: recorded,
        access_count: 0,
        linked_patterns: vec![],
        linked_constraints: vec![],
        linked_files: vec![],
        linked_functions: vec![],
        tags: vec![],
        archived: false,
        superseded_by: None,
        supersedes: None,
        content_hash: format!("hash-{id}"),
    }
}

#[test]
fn diff_of_identical_times_is_empty() {
    let storage = engine();
    let t = Utc::now();
    let diff = storage
        .readers
        .with_conn(|conn| {
            cortex_temporal::query::diff::execute_diff(
                conn,
                &TemporalDiffQuery { time_a: t, time_b: t, scope: DiffScope::All },
            )
        })
        .unwrap();

    assert!(diff.created.is_empty());
    assert!(diff.archived.is_empty());
    assert!(diff.modified.is_empty());
    assert!(diff.confidence_shifts.is_empty());
    assert!(diff.reclassifications.is_empty());
}

/// Scenario: a memory's confidence moved from 0.5 to 0.85 between `t1` and
/// `t2` (recorded as a `confidence_changed` event, since the memories table
/// only ever holds current state, not per-version history). `diff(t1, t2)`
/// must report the shift as `+0.35`; `diff(t2, t1)` — the reversed query —
/// must report the exact negation, with old/new confidence swapped too.
#[tokio::test]
async fn reversed_diff_negates_confidence_shifts() {
    let storage = engine();
    let recorded_at = Utc::now() - Duration::hours(3);
    let t1 = Utc::now() - Duration::hours(2);
    let t2 = Utc::now() + Duration::hours(2);

    let mem = memory("mem-shift", 0.5, recorded_at);
    storage
        .writer
        .with_conn({
            let mem = mem.clone();
            move |conn| memory_crud::insert_memory(conn, &mem)
        })
        .await
        .unwrap();

    let mut updated = mem.clone();
    updated.confidence = Confidence::new(0.85);
    storage
        .writer
        .with_conn(move |conn| memory_crud::update_memory(conn, &updated))
        .await
        .unwrap();

    let forward = storage
        .readers
        .with_conn(|conn| {
            cortex_temporal::query::diff::execute_diff(
                conn,
                &TemporalDiffQuery { time_a: t1, time_b: t2, scope: DiffScope::All },
            )
        })
        .unwrap();
    let backward = storage
        .readers
        .with_conn(|conn| {
            cortex_temporal::query::diff::execute_diff(
                conn,
                &TemporalDiffQuery { time_a: t2, time_b: t1, scope: DiffScope::All },
            )
        })
        .unwrap();

    assert_eq!(forward.confidence_shifts.len(), 1, "{forward:?}");
    assert_eq!(backward.confidence_shifts.len(), 1, "{backward:?}");

    let fwd = &forward.confidence_shifts[0];
    let bwd = &backward.confidence_shifts[0];

    assert!((fwd.delta - 0.35).abs() < 1e-9);
    assert!((bwd.delta - -0.35).abs() < 1e-9, "reversed diff must negate the delta, got {bwd:?}");
    assert_eq!(fwd.old_confidence, bwd.new_confidence);
    assert_eq!(fwd.new_confidence, bwd.old_confidence);
}
