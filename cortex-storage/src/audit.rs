//! Audit log facade over `queries::audit_ops` — provenance-style
//! read access for the decision-replay and trust subsystems.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use cortex_core::errors::CortexResult;
use cortex_core::models::{AuditActor, AuditEntry};

use crate::pool::ReadPool;
use crate::queries::audit_ops;

pub fn history_for_memory(readers: &Arc<ReadPool>, memory_id: &str) -> CortexResult<Vec<AuditEntry>> {
    let id = memory_id.to_string();
    readers.with_conn(|conn| audit_ops::query_by_memory(conn, &id))
}

pub fn history_in_range(
    readers: &Arc<ReadPool>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> CortexResult<Vec<AuditEntry>> {
    readers.with_conn(|conn| audit_ops::query_by_time_range(conn, from, to))
}

pub fn history_for_actor(readers: &Arc<ReadPool>, actor: &AuditActor) -> CortexResult<Vec<AuditEntry>> {
    let actor = actor.clone();
    readers.with_conn(move |conn| audit_ops::query_by_actor(conn, &actor))
}
