//! `data_access` and `sensitive_fields` table queries (spec.md §3, §4.2).

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

use super::sqe;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DataAccessRecord {
    pub id: Option<i64>,
    pub function_id: i64,
    pub table_name: String,
    pub operation: String,
    pub fields: String,
    pub orm: Option<String>,
    pub line: i64,
    pub confidence: f64,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DataAccessRecord> {
    Ok(DataAccessRecord {
        id: row.get(0)?,
        function_id: row.get(1)?,
        table_name: row.get(2)?,
        operation: row.get(3)?,
        fields: row.get(4)?,
        orm: row.get(5)?,
        line: row.get(6)?,
        confidence: row.get(7)?,
    })
}

const SELECT_COLUMNS: &str = "id, function_id, table_name, operation, fields, orm, line, confidence";

pub fn insert_data_access(conn: &Connection, row: &DataAccessRecord) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO data_access (function_id, table_name, operation, fields, orm, line, confidence)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .map_err(sqe)?
    .execute(params![
        row.function_id, row.table_name, row.operation, row.fields, row.orm, row.line, row.confidence,
    ])
    .map_err(sqe)?;
    Ok(())
}

pub fn insert_data_access_batch(conn: &Connection, rows: &[DataAccessRecord]) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO data_access (function_id, table_name, operation, fields, orm, line, confidence)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(sqe)?;
    let mut count = 0;
    for r in rows {
        stmt.execute(params![r.function_id, r.table_name, r.operation, r.fields, r.orm, r.line, r.confidence])
            .map_err(sqe)?;
        count += 1;
    }
    Ok(count)
}

pub fn query_data_access_by_function(conn: &Connection, function_id: i64) -> Result<Vec<DataAccessRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM data_access WHERE function_id = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![function_id], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

pub fn query_data_access_by_table(conn: &Connection, table_name: &str) -> Result<Vec<DataAccessRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM data_access WHERE table_name = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![table_name], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

pub fn delete_data_access_by_function(conn: &Connection, function_id: i64) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM data_access WHERE function_id = ?1", params![function_id])
        .map_err(sqe)
}

pub fn count_data_access(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM data_access", [], |row| row.get(0))
        .map_err(sqe)
}

#[derive(Debug, Clone)]
pub struct SensitiveFieldRecord {
    pub table_name: String,
    pub field_name: String,
    pub category: String,
    pub specificity: f64,
}

pub fn upsert_sensitive_field(conn: &Connection, row: &SensitiveFieldRecord) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO sensitive_fields (table_name, field_name, category, specificity)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(table_name, field_name) DO UPDATE SET
            category = excluded.category, specificity = excluded.specificity",
    )
    .map_err(sqe)?
    .execute(params![row.table_name, row.field_name, row.category, row.specificity])
    .map_err(sqe)?;
    Ok(())
}

pub fn get_sensitive_fields_by_table(conn: &Connection, table_name: &str) -> Result<Vec<SensitiveFieldRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT table_name, field_name, category, specificity
             FROM sensitive_fields WHERE table_name = ?1",
        )
        .map_err(sqe)?;
    let rows = stmt
        .query_map(params![table_name], |row| {
            Ok(SensitiveFieldRecord {
                table_name: row.get(0)?,
                field_name: row.get(1)?,
                category: row.get(2)?,
                specificity: row.get(3)?,
            })
        })
        .map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

pub fn get_all_sensitive_fields(conn: &Connection) -> Result<Vec<SensitiveFieldRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT table_name, field_name, category, specificity FROM sensitive_fields")
        .map_err(sqe)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(SensitiveFieldRecord {
                table_name: row.get(0)?,
                field_name: row.get(1)?,
                category: row.get(2)?,
                specificity: row.get(3)?,
            })
        })
        .map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}
