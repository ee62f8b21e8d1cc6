//! Invalidation for the materialized `CG.Reachability`/`CG.Impact`/
//! `CG.Coupling` tables (`reachability_cache`, `impact_scores`,
//! `coupling_metrics`, `coupling_cycles`).
//!
//! These tables cache the output of graph analyses that are expensive to
//! recompute from scratch; a rescan that changes any function's call
//! edges invalidates whatever cached result depended on it. Invalidation
//! here is coarse (per-function for reachability/impact, whole-table for
//! coupling) rather than a precise dependency graph — the analyses that
//! repopulate these tables are cheap enough to rerun wholesale after a
//! scan, so over-invalidating costs a recompute, not correctness.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

use crate::queries::sqe;

/// Drop every cached reachability/impact row that mentions `function_id`,
/// either as the source node or as the subject of an impact score. Called
/// once per function whose `call_edges` changed during a rescan.
pub fn invalidate_function(conn: &Connection, function_id: i64) -> Result<(), StorageError> {
    conn.execute(
        "DELETE FROM impact_scores WHERE function_id = ?1",
        params![function_id],
    )
    .map_err(sqe)?;

    conn.execute(
        "DELETE FROM reachability_cache WHERE source_node = ?1",
        params![function_id.to_string()],
    )
    .map_err(sqe)?;

    Ok(())
}

/// Drop all four materialized tables. Used after a scan touches enough of
/// the call graph (import/export changes, file removal) that per-function
/// invalidation isn't worth tracking precisely — `CG.Coupling` module
/// boundaries in particular shift with any import change, not just a
/// single function's edges.
pub fn invalidate_all(conn: &Connection) -> Result<(), StorageError> {
    conn.execute("DELETE FROM reachability_cache", []).map_err(sqe)?;
    conn.execute("DELETE FROM impact_scores", []).map_err(sqe)?;
    conn.execute("DELETE FROM coupling_metrics", []).map_err(sqe)?;
    conn.execute("DELETE FROM coupling_cycles", []).map_err(sqe)?;
    Ok(())
}

/// True if every materialized table is empty — used by callers deciding
/// whether a fresh build needs to run the analyses before anything can
/// be queried, versus an incremental rescan that can trust stale-but-
/// present rows until its own invalidation pass runs.
pub fn is_empty(conn: &Connection) -> Result<bool, StorageError> {
    let reachability: i64 = conn
        .query_row("SELECT COUNT(*) FROM reachability_cache", [], |row| row.get(0))
        .map_err(sqe)?;
    let impact: i64 = conn
        .query_row("SELECT COUNT(*) FROM impact_scores", [], |row| row.get(0))
        .map_err(sqe)?;
    let coupling: i64 = conn
        .query_row("SELECT COUNT(*) FROM coupling_metrics", [], |row| row.get(0))
        .map_err(sqe)?;
    Ok(reachability == 0 && impact == 0 && coupling == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabaseManager;
    use crate::queries::structural::{self, ImpactScoreRecord, ReachabilityCacheRecord};

    #[test]
    fn invalidate_function_drops_only_its_rows() {
        let db = DatabaseManager::open_in_memory().unwrap();
        db.with_reader(|conn| {
            structural::upsert_impact_score(
                conn,
                &ImpactScoreRecord {
                    function_id: 1,
                    affected_count: 3,
                    entry_point_hits: 1,
                    sensitive_paths: 0,
                    depth: 2,
                    risk_score: 40.0,
                    risk_bucket: "medium".into(),
                },
            )
            .unwrap();
            structural::upsert_impact_score(
                conn,
                &ImpactScoreRecord {
                    function_id: 2,
                    affected_count: 1,
                    entry_point_hits: 0,
                    sensitive_paths: 0,
                    depth: 1,
                    risk_score: 10.0,
                    risk_bucket: "low".into(),
                },
            )
            .unwrap();
            structural::upsert_reachability(
                conn,
                &ReachabilityCacheRecord {
                    source_node: "1".into(),
                    direction: "forward".into(),
                    reachable_set: "[]".into(),
                    sensitivity: "none".into(),
                },
            )
            .unwrap();

            invalidate_function(conn, 1).unwrap();

            assert!(structural::get_impact_score(conn, 1).unwrap().is_none());
            assert!(structural::get_impact_score(conn, 2).unwrap().is_some());
            assert!(structural::get_reachability(conn, "1", "forward").unwrap().is_none());
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn invalidate_all_clears_every_table() {
        let db = DatabaseManager::open_in_memory().unwrap();
        db.with_reader(|conn| {
            structural::upsert_coupling_metrics(
                conn,
                &structural::CouplingMetricsRecord {
                    module: "a".into(),
                    ce: 1,
                    ca: 2,
                    instability: 0.33,
                    abstractness: 0.0,
                    distance: 0.67,
                    zone: "zone_of_pain".into(),
                },
            )
            .unwrap();
            assert!(!is_empty(conn).unwrap());

            invalidate_all(conn).unwrap();
            assert!(is_empty(conn).unwrap());
            Ok(())
        })
        .unwrap();
    }
}
