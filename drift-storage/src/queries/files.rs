//! `file_metadata` table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

use super::sqe;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FileMetadataRecord {
    pub path: String,
    pub language: Option<String>,
    pub file_size: i64,
    pub content_hash: Vec<u8>,
    pub mtime_secs: i64,
    pub mtime_nanos: i64,
    pub last_scanned_at: i64,
    pub scan_duration_us: Option<i64>,
    pub pattern_count: i64,
    pub function_count: i64,
    pub error_count: i64,
    pub error: Option<String>,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FileMetadataRecord> {
    Ok(FileMetadataRecord {
        path: row.get(0)?,
        language: row.get(1)?,
        file_size: row.get(2)?,
        content_hash: row.get(3)?,
        mtime_secs: row.get(4)?,
        mtime_nanos: row.get(5)?,
        last_scanned_at: row.get(6)?,
        scan_duration_us: row.get(7)?,
        pattern_count: row.get(8)?,
        function_count: row.get(9)?,
        error_count: row.get(10)?,
        error: row.get(11)?,
    })
}

const SELECT_COLUMNS: &str = "path, language, file_size, content_hash, mtime_secs, mtime_nanos,
     last_scanned_at, scan_duration_us, pattern_count, function_count, error_count, error";

pub fn upsert_file_metadata(conn: &Connection, r: &FileMetadataRecord) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO file_metadata
         (path, language, file_size, content_hash, mtime_secs, mtime_nanos,
          last_scanned_at, scan_duration_us, pattern_count, function_count, error_count, error)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT(path) DO UPDATE SET
            language = excluded.language,
            file_size = excluded.file_size,
            content_hash = excluded.content_hash,
            mtime_secs = excluded.mtime_secs,
            mtime_nanos = excluded.mtime_nanos,
            last_scanned_at = excluded.last_scanned_at,
            scan_duration_us = excluded.scan_duration_us,
            pattern_count = excluded.pattern_count,
            function_count = excluded.function_count,
            error_count = excluded.error_count,
            error = excluded.error",
    )
    .map_err(sqe)?
    .execute(params![
        r.path, r.language, r.file_size, r.content_hash, r.mtime_secs, r.mtime_nanos,
        r.last_scanned_at, r.scan_duration_us, r.pattern_count, r.function_count,
        r.error_count, r.error,
    ])
    .map_err(sqe)?;
    Ok(())
}

pub fn load_all_file_metadata(conn: &Connection) -> Result<Vec<FileMetadataRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM file_metadata"))
        .map_err(sqe)?;
    let rows = stmt.query_map([], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

pub fn get_file_metadata(conn: &Connection, path: &str) -> Result<Option<FileMetadataRecord>, StorageError> {
    conn.prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM file_metadata WHERE path = ?1"))
        .map_err(sqe)?
        .query_row(params![path], map_row)
        .optional()
        .map_err(sqe)
}

pub fn update_function_count(conn: &Connection, path: &str, count: i64) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE file_metadata SET function_count = ?2 WHERE path = ?1",
        params![path, count],
    )
    .map_err(sqe)?;
    Ok(())
}

pub fn update_file_error(
    conn: &Connection,
    path: &str,
    error_count: i64,
    error_msg: Option<&str>,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE file_metadata SET error_count = ?2, error = ?3 WHERE path = ?1",
        params![path, error_count, error_msg],
    )
    .map_err(sqe)?;
    Ok(())
}

pub fn delete_file_metadata(conn: &Connection, path: &str) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM file_metadata WHERE path = ?1", params![path])
        .map_err(sqe)
}

pub fn count_files(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM file_metadata", [], |row| row.get(0))
        .map_err(sqe)
}
