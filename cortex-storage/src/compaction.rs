//! Retention sweeps: archiving aged events and pruning old snapshots so
//! the hot tables stay small while full history stays reconstructible
//! from the archive.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use cortex_core::errors::CortexResult;

use crate::pool::WriteConnection;
use crate::queries::event_ops;
use crate::queries::snapshot_ops;

/// Move events recorded before `before` out of `memory_events` into
/// `memory_events_archive`, provided a snapshot at or after
/// `verified_snapshot_event_id` already covers them — archiving past an
/// unverified point would make replay unable to reconstruct state.
pub async fn archive_old_events(
    writer: &Arc<WriteConnection>,
    before: DateTime<Utc>,
    verified_snapshot_event_id: u64,
) -> CortexResult<u64> {
    let before = before.to_rfc3339();
    writer
        .with_conn(move |conn| {
            event_ops::move_events_to_archive(conn, &before, verified_snapshot_event_id)
        })
        .await
}

/// Drop snapshots recorded before `before`, optionally keeping the
/// latest one per memory per month beyond that for long-range `as_of`
/// queries.
pub async fn prune_old_snapshots(
    writer: &Arc<WriteConnection>,
    before: DateTime<Utc>,
    keep_monthly: bool,
) -> CortexResult<u64> {
    let before = before.to_rfc3339();
    writer
        .with_conn(move |conn| snapshot_ops::delete_old_snapshots(conn, &before, keep_monthly))
        .await
}

/// Run both sweeps back to back. Called on a timer by the owning engine,
/// never inline with a write request. `verified_snapshot_event_id` must
/// come from a snapshot already confirmed to reconstruct correctly.
pub async fn run_retention_sweep(
    writer: &Arc<WriteConnection>,
    before: DateTime<Utc>,
    verified_snapshot_event_id: u64,
    keep_monthly_snapshots: bool,
) -> CortexResult<(u64, u64)> {
    let archived = archive_old_events(writer, before, verified_snapshot_event_id).await?;
    let pruned = prune_old_snapshots(writer, before, keep_monthly_snapshots).await?;
    tracing::info!(archived, pruned, "retention sweep complete");
    Ok((archived, pruned))
}
