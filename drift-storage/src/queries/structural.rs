//! `coupling_metrics`, `coupling_cycles`, `reachability_cache`, `impact_scores`
//! — `CG.Coupling`, `CG.Reachability`, `CG.Impact` (spec.md §4.5, §4.6).

use drift_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

use super::sqe;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CouplingMetricsRecord {
    pub module: String,
    pub ce: u32,
    pub ca: u32,
    pub instability: f64,
    pub abstractness: f64,
    pub distance: f64,
    pub zone: String,
}

fn map_coupling_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CouplingMetricsRecord> {
    Ok(CouplingMetricsRecord {
        module: row.get(0)?,
        ce: row.get(1)?,
        ca: row.get(2)?,
        instability: row.get(3)?,
        abstractness: row.get(4)?,
        distance: row.get(5)?,
        zone: row.get(6)?,
    })
}

pub fn upsert_coupling_metrics(conn: &Connection, row: &CouplingMetricsRecord) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO coupling_metrics (module, ce, ca, instability, abstractness, distance, zone)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(module) DO UPDATE SET
            ce = excluded.ce, ca = excluded.ca, instability = excluded.instability,
            abstractness = excluded.abstractness, distance = excluded.distance, zone = excluded.zone",
    )
    .map_err(sqe)?
    .execute(params![row.module, row.ce, row.ca, row.instability, row.abstractness, row.distance, row.zone])
    .map_err(sqe)?;
    Ok(())
}

pub fn get_coupling_metrics(conn: &Connection, module: &str) -> Result<Option<CouplingMetricsRecord>, StorageError> {
    conn.prepare_cached(
        "SELECT module, ce, ca, instability, abstractness, distance, zone
         FROM coupling_metrics WHERE module = ?1",
    )
    .map_err(sqe)?
    .query_row(params![module], map_coupling_row)
    .optional()
    .map_err(sqe)
}

pub fn get_all_coupling_metrics(conn: &Connection) -> Result<Vec<CouplingMetricsRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT module, ce, ca, instability, abstractness, distance, zone FROM coupling_metrics")
        .map_err(sqe)?;
    let rows = stmt.query_map([], map_coupling_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

pub fn get_coupling_metrics_by_zone(conn: &Connection, zone: &str) -> Result<Vec<CouplingMetricsRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT module, ce, ca, instability, abstractness, distance, zone
             FROM coupling_metrics WHERE zone = ?1",
        )
        .map_err(sqe)?;
    let rows = stmt.query_map(params![zone], map_coupling_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

#[derive(Debug, Clone)]
pub struct CouplingCycleRecord {
    pub id: i64,
    pub members: String,
    pub break_suggestions: String,
    pub created_at: i64,
}

pub fn insert_coupling_cycle(conn: &Connection, members: &str, break_suggestions: &str) -> Result<(), StorageError> {
    conn.prepare_cached("INSERT INTO coupling_cycles (members, break_suggestions) VALUES (?1, ?2)")
        .map_err(sqe)?
        .execute(params![members, break_suggestions])
        .map_err(sqe)?;
    Ok(())
}

pub fn query_coupling_cycles(conn: &Connection) -> Result<Vec<CouplingCycleRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, members, break_suggestions, created_at FROM coupling_cycles ORDER BY id")
        .map_err(sqe)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(CouplingCycleRecord {
                id: row.get(0)?,
                members: row.get(1)?,
                break_suggestions: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReachabilityCacheRecord {
    pub source_node: String,
    pub direction: String,
    pub reachable_set: String,
    pub sensitivity: String,
}

pub fn upsert_reachability(conn: &Connection, row: &ReachabilityCacheRecord) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO reachability_cache (source_node, direction, reachable_set, sensitivity)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(source_node, direction) DO UPDATE SET
            reachable_set = excluded.reachable_set, sensitivity = excluded.sensitivity",
    )
    .map_err(sqe)?
    .execute(params![row.source_node, row.direction, row.reachable_set, row.sensitivity])
    .map_err(sqe)?;
    Ok(())
}

pub fn get_reachability(
    conn: &Connection,
    source_node: &str,
    direction: &str,
) -> Result<Option<ReachabilityCacheRecord>, StorageError> {
    conn.prepare_cached(
        "SELECT source_node, direction, reachable_set, sensitivity
         FROM reachability_cache WHERE source_node = ?1 AND direction = ?2",
    )
    .map_err(sqe)?
    .query_row(params![source_node, direction], |row| {
        Ok(ReachabilityCacheRecord {
            source_node: row.get(0)?,
            direction: row.get(1)?,
            reachable_set: row.get(2)?,
            sensitivity: row.get(3)?,
        })
    })
    .optional()
    .map_err(sqe)
}

pub fn clear_reachability_cache(conn: &Connection) -> Result<(), StorageError> {
    conn.execute("DELETE FROM reachability_cache", []).map_err(sqe)?;
    Ok(())
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ImpactScoreRecord {
    pub function_id: i64,
    pub affected_count: u32,
    pub entry_point_hits: u32,
    pub sensitive_paths: u32,
    pub depth: u32,
    pub risk_score: f64,
    pub risk_bucket: String,
}

pub fn upsert_impact_score(conn: &Connection, row: &ImpactScoreRecord) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO impact_scores
         (function_id, affected_count, entry_point_hits, sensitive_paths, depth, risk_score, risk_bucket)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(function_id) DO UPDATE SET
            affected_count = excluded.affected_count,
            entry_point_hits = excluded.entry_point_hits,
            sensitive_paths = excluded.sensitive_paths,
            depth = excluded.depth,
            risk_score = excluded.risk_score,
            risk_bucket = excluded.risk_bucket",
    )
    .map_err(sqe)?
    .execute(params![
        row.function_id, row.affected_count, row.entry_point_hits,
        row.sensitive_paths, row.depth, row.risk_score, row.risk_bucket,
    ])
    .map_err(sqe)?;
    Ok(())
}

pub fn get_impact_score(conn: &Connection, function_id: i64) -> Result<Option<ImpactScoreRecord>, StorageError> {
    conn.prepare_cached(
        "SELECT function_id, affected_count, entry_point_hits, sensitive_paths, depth, risk_score, risk_bucket
         FROM impact_scores WHERE function_id = ?1",
    )
    .map_err(sqe)?
    .query_row(params![function_id], |row| {
        Ok(ImpactScoreRecord {
            function_id: row.get(0)?,
            affected_count: row.get(1)?,
            entry_point_hits: row.get(2)?,
            sensitive_paths: row.get(3)?,
            depth: row.get(4)?,
            risk_score: row.get(5)?,
            risk_bucket: row.get(6)?,
        })
    })
    .optional()
    .map_err(sqe)
}
