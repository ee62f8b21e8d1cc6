//! Version-history facade over `queries::version_ops`.
//!
//! Distinct from the event log: a version row is a full point-in-time
//! copy kept for quick rollback, whereas events are the append-only
//! audit trail everything else (snapshots, replay) is built from.

use std::sync::Arc;

use cortex_core::errors::CortexResult;

use crate::pool::{ReadPool, WriteConnection};
use crate::queries::version_ops::{self, MemoryVersion};

pub async fn record_version(
    writer: &Arc<WriteConnection>,
    memory_id: &str,
    content: &str,
    summary: &str,
    confidence: f64,
    changed_by: &str,
    reason: &str,
) -> CortexResult<i64> {
    let memory_id = memory_id.to_string();
    let content = content.to_string();
    let summary = summary.to_string();
    let changed_by = changed_by.to_string();
    let reason = reason.to_string();
    writer
        .with_conn(move |conn| {
            version_ops::insert_version(
                conn,
                &memory_id,
                &content,
                &summary,
                confidence,
                &changed_by,
                &reason,
            )
        })
        .await
}

pub fn history(readers: &Arc<ReadPool>, memory_id: &str) -> CortexResult<Vec<MemoryVersion>> {
    let id = memory_id.to_string();
    readers.with_conn(|conn| version_ops::get_version_history(conn, &id))
}

pub fn at_version(
    readers: &Arc<ReadPool>,
    memory_id: &str,
    version: i64,
) -> CortexResult<Option<MemoryVersion>> {
    let id = memory_id.to_string();
    readers.with_conn(|conn| version_ops::get_at_version(conn, &id, version))
}

/// Enforce `max_versions_per_memory` retention for one memory.
pub async fn enforce_retention(
    writer: &Arc<WriteConnection>,
    memory_id: &str,
    max_versions: i64,
) -> CortexResult<usize> {
    let id = memory_id.to_string();
    writer
        .with_conn(move |conn| version_ops::enforce_retention(conn, &id, max_versions))
        .await
}
