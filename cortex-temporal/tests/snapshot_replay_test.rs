//! Snapshot + replay must reconstruct the same state a full replay from
//! the beginning of the event log would, but in O(events since snapshot)
//! instead of O(all events).

use chrono::{Duration, Utc};
use cortex_core::config::StorageConfig;
use cortex_core::memory::*;
use cortex_core::models::{EventActor, MemoryEvent, MemoryEventType, SnapshotReason};
use cortex_storage::engine::StorageEngine;
use cortex_temporal::event_store;
use cortex_temporal::snapshot;

fn engine() -> StorageEngine {
    StorageEngine::open_in_memory(&StorageConfig::default()).unwrap()
}

fn initial_state(id: &str, at: chrono::DateTime<Utc>) -> BaseMemory {
    let content = TypedContent::Episodic(EpisodicContent {
        interaction: "snapshot test".to_string(),
        context: "snapshot test".to_string(),
        outcome: None,
    });
    BaseMemory {
        id: id.to_string(),
        memory_type: MemoryType::Episodic,
        content,
        summary: "v0".to_string(),
        transaction_time: at,
        valid_time: at,
        valid_until: None,
        confidence: Confidence::new(0.5),
        importance: Importance::Low,
        last_accessed: at,
        access_count: 0,
        linked_patterns: vec![],
        linked_constraints: vec![],
        linked_files: vec![],
        linked_functions: vec![],
        tags: vec![],
        archived: false,
        superseded_by: None,
        supersedes: None,
        content_hash: format!("hash-{id}-0"),
    }
}

fn confidence_event(memory_id: &str, at: chrono::DateTime<Utc>, old: f64, new: f64) -> MemoryEvent {
    MemoryEvent {
        event_id: 0,
        memory_id: memory_id.to_string(),
        recorded_at: at,
        event_type: MemoryEventType::ConfidenceChanged,
        delta: serde_json::json!({ "old": old, "new": new }),
        actor: EventActor::System("test".to_string()),
        caused_by: vec![],
        schema_version: 1,
    }
}

#[tokio::test]
async fn reconstruction_matches_full_replay_across_a_snapshot_boundary() {
    let storage = engine();
    let memory_id = "mem-snap";
    // `create_snapshot` stamps `snapshot_at` with the real wall clock, so
    // every event timestamp below (and the final reconstruction target)
    // must stay anchored near "now" rather than being backdated.
    let t0 = Utc::now();
    let base = initial_state(memory_id, t0);

    let created = MemoryEvent {
        event_id: 0,
        memory_id: memory_id.to_string(),
        recorded_at: t0,
        event_type: MemoryEventType::Created,
        delta: serde_json::to_value(&base).unwrap(),
        actor: EventActor::System("test".to_string()),
        caused_by: vec![],
        schema_version: 1,
    };
    event_store::append::append(&storage.writer, &created).await.unwrap();

    // First batch of confidence changes, then a snapshot capturing the
    // state as of that point.
    let mut confidence = 0.5;
    for i in 0..5 {
        let at = t0 + Duration::minutes(i + 1);
        let next = confidence + 0.05;
        event_store::append::append(&storage.writer, &confidence_event(memory_id, at, confidence, next))
            .await
            .unwrap();
        confidence = next;
    }

    let mid_state = {
        let mut state = base.clone();
        state.confidence = Confidence::new(confidence);
        state
    };
    snapshot::create::create_snapshot(&storage.writer, memory_id, &mid_state, SnapshotReason::EventThreshold)
        .await
        .unwrap();

    // More events after the snapshot.
    for i in 5..9 {
        let at = t0 + Duration::minutes(i + 1);
        let next = confidence + 0.02;
        event_store::append::append(&storage.writer, &confidence_event(memory_id, at, confidence, next))
            .await
            .unwrap();
        confidence = next;
    }

    let target = t0 + Duration::hours(2);

    let via_snapshot = snapshot::reconstruct::reconstruct_at(&storage.readers, memory_id, target)
        .unwrap()
        .expect("state should reconstruct");

    let all_events = event_store::query::get_events(&storage.readers, memory_id, Some(target)).unwrap();
    let via_full_replay = event_store::replay::replay_events(&all_events, base);

    assert_eq!(via_snapshot.confidence.value(), via_full_replay.confidence.value());
    assert!((via_snapshot.confidence.value() - confidence).abs() < 1e-9);
    assert_eq!(via_snapshot.id, via_full_replay.id);
    assert_eq!(via_snapshot.summary, via_full_replay.summary);
}
