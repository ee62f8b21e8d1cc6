//! `parse_cache` table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

use super::sqe;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParseCacheRecord {
    pub content_hash: Vec<u8>,
    pub language: String,
    pub parse_result_json: String,
    pub created_at: i64,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ParseCacheRecord> {
    Ok(ParseCacheRecord {
        content_hash: row.get(0)?,
        language: row.get(1)?,
        parse_result_json: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub fn get_parse_cache_by_hash(
    conn: &Connection,
    content_hash: &[u8],
) -> Result<Option<ParseCacheRecord>, StorageError> {
    conn.prepare_cached(
        "SELECT content_hash, language, parse_result_json, created_at
         FROM parse_cache WHERE content_hash = ?1",
    )
    .map_err(sqe)?
    .query_row(params![content_hash], map_row)
    .optional()
    .map_err(sqe)
}

pub fn insert_parse_cache(
    conn: &Connection,
    content_hash: &[u8],
    language: &str,
    parse_result_json: &str,
    created_at: i64,
) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT OR REPLACE INTO parse_cache (content_hash, language, parse_result_json, created_at)
         VALUES (?1, ?2, ?3, ?4)",
    )
    .map_err(sqe)?
    .execute(params![content_hash, language, parse_result_json, created_at])
    .map_err(sqe)?;
    Ok(())
}

pub fn invalidate_parse_cache(conn: &Connection, content_hash: &[u8]) -> Result<(), StorageError> {
    conn.execute("DELETE FROM parse_cache WHERE content_hash = ?1", params![content_hash])
        .map_err(sqe)?;
    Ok(())
}

pub fn count_parse_cache(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM parse_cache", [], |row| row.get(0))
        .map_err(sqe)
}
