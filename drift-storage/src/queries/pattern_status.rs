//! `pattern_status` table queries — PATTERN's `discovered → approved →
//! ignored` lifecycle (spec.md §4.7). Kept separate from
//! `patterns::PatternConfidenceRow` (the Beta posterior); this table is
//! the persistence half of `drift-analysis::patterns::feedback`'s
//! auto-approval gate and `approve_pattern` external operation.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

use super::sqe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternLifecycle {
    Discovered,
    Approved,
    Ignored,
}

impl PatternLifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternLifecycle::Discovered => "discovered",
            PatternLifecycle::Approved => "approved",
            PatternLifecycle::Ignored => "ignored",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "approved" => PatternLifecycle::Approved,
            "ignored" => PatternLifecycle::Ignored,
            _ => PatternLifecycle::Discovered,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PatternStatusRow {
    pub pattern_id: String,
    pub status: PatternLifecycle,
    pub user_set: bool,
    pub actor_id: Option<String>,
    pub updated_at: i64,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatternStatusRow> {
    let status: String = row.get(1)?;
    Ok(PatternStatusRow {
        pattern_id: row.get(0)?,
        status: PatternLifecycle::from_str(&status),
        user_set: row.get::<_, i64>(2)? != 0,
        actor_id: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

const COLUMNS: &str = "pattern_id, status, user_set, actor_id, updated_at";

pub fn get_status(conn: &Connection, pattern_id: &str) -> Result<Option<PatternStatusRow>, StorageError> {
    conn.prepare_cached(&format!("SELECT {COLUMNS} FROM pattern_status WHERE pattern_id = ?1"))
        .map_err(sqe)?
        .query_row(params![pattern_id], map_row)
        .optional()
        .map_err(sqe)
}

/// Insert-or-update. Callers are expected to have already applied the
/// "never overwrite a user-set status" rule before calling this for an
/// auto-approval decision; `approve_pattern` (user action) always wins.
pub fn upsert_status(
    conn: &Connection,
    pattern_id: &str,
    status: PatternLifecycle,
    user_set: bool,
    actor_id: Option<&str>,
    updated_at: i64,
) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO pattern_status (pattern_id, status, user_set, actor_id, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(pattern_id) DO UPDATE SET
            status = excluded.status,
            user_set = excluded.user_set,
            actor_id = excluded.actor_id,
            updated_at = excluded.updated_at",
    )
    .map_err(sqe)?
    .execute(params![pattern_id, status.as_str(), user_set as i64, actor_id, updated_at])
    .map_err(sqe)?;
    Ok(())
}

pub fn query_by_status(conn: &Connection, status: PatternLifecycle) -> Result<Vec<PatternStatusRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {COLUMNS} FROM pattern_status WHERE status = ?1 ORDER BY pattern_id"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![status.as_str()], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}
