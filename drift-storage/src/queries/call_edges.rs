//! `call_edges` table queries — written by `CG.StreamingBuild`, resolved by
//! `CG.Resolver` (six-strategy pipeline, spec.md §4.4).

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

use super::sqe;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CallEdgeRecord {
    pub caller_id: i64,
    pub callee_id: Option<i64>,
    pub callee_name: String,
    pub call_kind: String,
    pub resolution: String,
    pub confidence: f64,
    pub call_site_line: i64,
}

const SELECT_COLUMNS: &str =
    "caller_id, callee_id, callee_name, call_kind, resolution, confidence, call_site_line";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CallEdgeRecord> {
    Ok(CallEdgeRecord {
        caller_id: row.get(0)?,
        callee_id: row.get(1)?,
        callee_name: row.get(2)?,
        call_kind: row.get(3)?,
        resolution: row.get(4)?,
        confidence: row.get(5)?,
        call_site_line: row.get(6)?,
    })
}

pub fn insert_call_edges(conn: &Connection, edges: &[CallEdgeRecord]) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO call_edges
             (caller_id, callee_id, callee_name, call_kind, resolution, confidence, call_site_line)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(sqe)?;

    let mut count = 0;
    for e in edges {
        stmt.execute(params![
            e.caller_id, e.callee_id, e.callee_name, e.call_kind,
            e.resolution, e.confidence, e.call_site_line,
        ])
        .map_err(sqe)?;
        count += 1;
    }
    Ok(count)
}

pub fn get_edges_by_caller(conn: &Connection, caller_id: i64) -> Result<Vec<CallEdgeRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM call_edges WHERE caller_id = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![caller_id], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

pub fn get_edges_by_callee(conn: &Connection, callee_id: i64) -> Result<Vec<CallEdgeRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM call_edges WHERE callee_id = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![callee_id], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

pub fn delete_edges_by_file(conn: &Connection, file: &str) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM call_edges WHERE caller_id IN (SELECT id FROM functions WHERE file = ?1)",
        params![file],
    )
    .map_err(sqe)
}

pub fn get_unresolved_edges(conn: &Connection) -> Result<Vec<CallEdgeRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {SELECT_COLUMNS} FROM call_edges WHERE callee_id IS NULL"
        ))
        .map_err(sqe)?;
    let rows = stmt.query_map([], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

#[allow(clippy::too_many_arguments)]
pub fn resolve_call_edge(
    conn: &Connection,
    caller_id: i64,
    call_site_line: i64,
    callee_name: &str,
    callee_id: i64,
    resolution: &str,
    confidence: f64,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE call_edges SET callee_id = ?4, resolution = ?5, confidence = ?6
         WHERE caller_id = ?1 AND call_site_line = ?2 AND callee_name = ?3",
        params![caller_id, call_site_line, callee_name, callee_id, resolution, confidence],
    )
    .map_err(sqe)?;
    Ok(())
}

pub fn count_call_edges(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM call_edges", [], |row| row.get(0))
        .map_err(sqe)
}

pub fn count_resolved_edges(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM call_edges WHERE callee_id IS NOT NULL AND resolution != 'fuzzy'",
        [],
        |row| row.get(0),
    )
    .map_err(sqe)
}
