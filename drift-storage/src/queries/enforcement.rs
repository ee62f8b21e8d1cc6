//! `violations` and `feedback` table queries — the input to `CG.Pattern`'s
//! confidence update (spec.md §4.7).

use drift_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

use super::sqe;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ViolationRecord {
    pub id: String,
    pub pattern_id: String,
    pub file: String,
    pub line: i64,
    pub severity: String,
    pub confidence_at_detection: f64,
}

fn map_violation_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ViolationRecord> {
    Ok(ViolationRecord {
        id: row.get(0)?,
        pattern_id: row.get(1)?,
        file: row.get(2)?,
        line: row.get(3)?,
        severity: row.get(4)?,
        confidence_at_detection: row.get(5)?,
    })
}

const VIOLATION_COLUMNS: &str = "id, pattern_id, file, line, severity, confidence_at_detection";

pub fn insert_violation(conn: &Connection, v: &ViolationRecord) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO violations (id, pattern_id, file, line, severity, confidence_at_detection)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .map_err(sqe)?
    .execute(params![v.id, v.pattern_id, v.file, v.line, v.severity, v.confidence_at_detection])
    .map_err(sqe)?;
    Ok(())
}

pub fn get_violation(conn: &Connection, id: &str) -> Result<Option<ViolationRecord>, StorageError> {
    conn.prepare_cached(&format!("SELECT {VIOLATION_COLUMNS} FROM violations WHERE id = ?1"))
        .map_err(sqe)?
        .query_row(params![id], map_violation_row)
        .optional()
        .map_err(sqe)
}

pub fn query_violations_by_file(conn: &Connection, file: &str) -> Result<Vec<ViolationRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {VIOLATION_COLUMNS} FROM violations WHERE file = ?1 ORDER BY line"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![file], map_violation_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

pub fn query_violations_by_pattern(conn: &Connection, pattern_id: &str) -> Result<Vec<ViolationRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {VIOLATION_COLUMNS} FROM violations WHERE pattern_id = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![pattern_id], map_violation_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

pub fn query_all_violations(conn: &Connection) -> Result<Vec<ViolationRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {VIOLATION_COLUMNS} FROM violations"))
        .map_err(sqe)?;
    let rows = stmt.query_map([], map_violation_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    pub violation_id: String,
    pub pattern_id: String,
    pub action: String,
    pub reason: Option<String>,
    pub created_at: i64,
}

pub fn insert_feedback(conn: &Connection, f: &FeedbackRecord) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO feedback (violation_id, pattern_id, action, reason, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .map_err(sqe)?
    .execute(params![f.violation_id, f.pattern_id, f.action, f.reason, f.created_at])
    .map_err(sqe)?;
    Ok(())
}

pub fn query_feedback_by_pattern(conn: &Connection, pattern_id: &str) -> Result<Vec<FeedbackRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT violation_id, pattern_id, action, reason, created_at
             FROM feedback WHERE pattern_id = ?1 ORDER BY created_at",
        )
        .map_err(sqe)?;
    let rows = stmt
        .query_map(params![pattern_id], |row| {
            Ok(FeedbackRecord {
                violation_id: row.get(0)?,
                pattern_id: row.get(1)?,
                action: row.get(2)?,
                reason: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackStats {
    pub total_count: u32,
    pub fix_count: u32,
    pub dismiss_count: u32,
    pub suppress_count: u32,
}

pub fn query_feedback_stats(conn: &Connection, pattern_id: &str) -> Result<FeedbackStats, StorageError> {
    conn.prepare_cached(
        "SELECT COUNT(*),
                SUM(CASE WHEN action = 'fix' THEN 1 ELSE 0 END),
                SUM(CASE WHEN action = 'dismiss' THEN 1 ELSE 0 END),
                SUM(CASE WHEN action = 'suppress' THEN 1 ELSE 0 END)
         FROM feedback WHERE pattern_id = ?1",
    )
    .map_err(sqe)?
    .query_row(params![pattern_id], |row| {
        Ok(FeedbackStats {
            total_count: row.get(0)?,
            fix_count: row.get::<_, Option<u32>>(1)?.unwrap_or(0),
            dismiss_count: row.get::<_, Option<u32>>(2)?.unwrap_or(0),
            suppress_count: row.get::<_, Option<u32>>(3)?.unwrap_or(0),
        })
    })
    .map_err(sqe)
}
