//! Crash recovery: WAL checkpointing and integrity verification run at
//! startup before the writer actor and read pool are handed out.

use std::path::Path;

use rusqlite::Connection;

use cortex_core::errors::CortexResult;

use crate::to_storage_err;

/// Force a full WAL checkpoint, folding the write-ahead log back into
/// the main database file. Run after an unclean shutdown (a leftover
/// `-wal` file next to the database) so the reader pool opens a
/// consistent, fully-checkpointed file.
pub fn checkpoint(conn: &Connection) -> CortexResult<()> {
    conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
        .map_err(|e| to_storage_err(format!("wal checkpoint: {e}")))
}

/// Run SQLite's own integrity check. Returns `Ok(())` if the database
/// reports `ok`, otherwise an error naming what `integrity_check` found.
pub fn verify_integrity(conn: &Connection) -> CortexResult<()> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(|e| to_storage_err(format!("integrity check: {e}")))?;

    if result == "ok" {
        Ok(())
    } else {
        Err(to_storage_err(format!("integrity check failed: {result}")))
    }
}

/// If a `-wal` file exists next to `db_path`, the previous process did
/// not shut down cleanly. Open a short-lived connection, checkpoint and
/// verify integrity before the engine stands up its writer and readers.
pub fn recover_if_needed(db_path: &Path) -> CortexResult<()> {
    let wal_path = db_path.with_extension("db-wal");
    if !wal_path.exists() {
        return Ok(());
    }

    tracing::warn!(
        wal = %wal_path.display(),
        "found leftover WAL file, recovering before opening store"
    );
    let conn = Connection::open(db_path).map_err(|e| to_storage_err(e.to_string()))?;
    checkpoint(&conn)?;
    verify_integrity(&conn)?;
    Ok(())
}
