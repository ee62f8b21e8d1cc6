//! Event log invariants: append-only (no row is ever mutated in place),
//! monotonically increasing `event_id` regardless of `recorded_at` order,
//! and transactional batch writes (a rolled-back batch leaves no partial
//! rows behind).

use cortex_core::config::StorageConfig;
use cortex_core::models::MemoryEventType;
use cortex_storage::engine::StorageEngine;
use cortex_storage::queries::event_ops;

fn engine() -> StorageEngine {
    StorageEngine::open_in_memory(&StorageConfig::default()).unwrap()
}

fn event_count(storage: &StorageEngine, memory_id: &str) -> u64 {
    storage.readers.with_conn(|conn| event_ops::get_event_count(conn, memory_id)).unwrap()
}

/// A1: once appended, an event row is immutable — the only way a memory's
/// history grows is by inserting a new row, never by rewriting an old one.
#[tokio::test]
async fn events_are_appended_not_mutated() {
    let storage = engine();
    let id = storage
        .writer
        .with_conn(|conn| {
            event_ops::insert_event(
                conn, "mem-1", "2026-01-01T00:00:00Z", "created", "{}", "system", "test", None, 1,
            )
        })
        .await
        .unwrap();

    let before = storage
        .readers
        .with_conn(|conn| event_ops::get_events_for_memory(conn, "mem-1", None))
        .unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].event_id, id);
    assert_eq!(before[0].delta, "{}");

    // A "correction" is a second event, not an in-place edit of the first.
    storage
        .writer
        .with_conn(|conn| {
            event_ops::insert_event(
                conn,
                "mem-1",
                "2026-01-01T00:05:00Z",
                "confidence_changed",
                r#"{"old":0.5,"new":0.7}"#,
                "system",
                "test",
                None,
                1,
            )
        })
        .await
        .unwrap();

    let after = storage
        .readers
        .with_conn(|conn| event_ops::get_events_for_memory(conn, "mem-1", None))
        .unwrap();
    assert_eq!(after.len(), 2, "the first event must still be present, unmodified");
    assert_eq!(after[0].event_id, before[0].event_id);
    assert_eq!(after[0].delta, "{}", "original row must not have been rewritten");
}

/// A2: `event_id` strictly increases in insertion order even when events
/// are appended with `recorded_at` timestamps that aren't monotonic (a
/// late-arriving backfill for an earlier point in time, say).
#[tokio::test]
async fn event_id_is_monotonic_regardless_of_recorded_at_order() {
    let storage = engine();
    let timestamps = ["2026-01-03T00:00:00Z", "2026-01-01T00:00:00Z", "2026-01-02T00:00:00Z"];

    let mut ids = Vec::new();
    for ts in timestamps {
        let id = storage
            .writer
            .with_conn(move |conn| {
                event_ops::insert_event(conn, "mem-2", ts, "created", "{}", "system", "test", None, 1)
            })
            .await
            .unwrap();
        ids.push(id);
    }

    assert!(ids.windows(2).all(|w| w[1] > w[0]), "event_id must increase in append order: {ids:?}");
    assert_eq!(event_count(&storage, "mem-2"), 3);
}

/// A3: a batch of events inserted inside one transaction is all-or-nothing.
/// Rolling back the transaction before commit must leave zero rows, not a
/// partially-applied prefix.
#[tokio::test]
async fn rolled_back_batch_leaves_no_partial_rows() {
    let storage = engine();

    storage
        .writer
        .with_conn(|conn| {
            let tx = conn.unchecked_transaction().map_err(|e| cortex_storage::to_storage_err(e.to_string()))?;
            for i in 0..5 {
                event_ops::insert_event(
                    &tx,
                    "mem-3",
                    &format!("2026-01-0{}T00:00:00Z", i + 1),
                    "created",
                    "{}",
                    "system",
                    "test",
                    None,
                    1,
                )?;
            }
            // Simulate a failure partway through the batch: abandon the
            // transaction instead of committing it.
            tx.rollback().map_err(|e| cortex_storage::to_storage_err(e.to_string()))?;
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(event_count(&storage, "mem-3"), 0, "a rolled-back batch must not leave any rows behind");

    // A committed batch of the same shape, by contrast, persists all of it.
    storage
        .writer
        .with_conn(|conn| {
            let tx = conn.unchecked_transaction().map_err(|e| cortex_storage::to_storage_err(e.to_string()))?;
            for i in 0..5 {
                event_ops::insert_event(
                    &tx,
                    "mem-3",
                    &format!("2026-01-0{}T00:00:00Z", i + 1),
                    "created",
                    "{}",
                    "system",
                    "test",
                    None,
                    1,
                )?;
            }
            tx.commit().map_err(|e| cortex_storage::to_storage_err(e.to_string()))?;
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(event_count(&storage, "mem-3"), 5);
}

/// A5 (mechanism): `MemoryEventType` round-trips through the same
/// `snake_case`-tagged serde encoding `insert_event`/`raw_to_event` use for
/// the `event_type` column. An event_type string outside the 17 known
/// variants must fail to parse rather than silently coercing to some
/// default variant — this is what lets the read path reject a corrupt or
/// forward-incompatible row instead of misreporting its type.
#[test]
fn unknown_event_type_string_fails_to_parse() {
    let parsed: Result<MemoryEventType, _> = serde_json::from_str("\"teleported\"");
    assert!(parsed.is_err(), "an unrecognized event_type must not silently parse as some variant");

    let known: MemoryEventType = serde_json::from_str("\"confidence_changed\"").unwrap();
    assert_eq!(known, MemoryEventType::ConfidenceChanged);
}
