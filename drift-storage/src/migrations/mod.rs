//! Migration runner — version tracking, forward-only, transactional per migration.

mod v001_core_graph;
mod v002_analysis;
mod v003_pattern_status;

use rusqlite::Connection;
use tracing::{debug, info, warn};

use drift_core::errors::StorageError;

/// Total number of migrations.
pub const LATEST_VERSION: u32 = 3;

type MigrationFn = fn(&Connection) -> Result<(), StorageError>;

const MIGRATIONS: [(u32, &str, MigrationFn); 3] = [
    (1, "core_graph", v001_core_graph::migrate),
    (2, "analysis", v002_analysis::migrate),
    (3, "pattern_status", v003_pattern_status::migrate),
];

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

/// Get the current schema version. Returns 0 if `schema_version` doesn't exist yet.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    let exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version'")
        .and_then(|mut stmt| stmt.exists([]))
        .map_err(sqe)?;

    if !exists {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version    INTEGER PRIMARY KEY,
                applied_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
            );",
        )
        .map_err(sqe)?;
        return Ok(0);
    }

    conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| row.get(0))
        .map_err(sqe)
}

/// Run all pending migrations. Forward-only, each wrapped in its own transaction.
pub fn run_migrations(conn: &Connection) -> Result<u32, StorageError> {
    let current = current_version(conn)?;
    let mut applied = 0;

    if current >= LATEST_VERSION {
        debug!("drift database schema is up to date (v{current})");
        return Ok(0);
    }

    info!("running drift migrations: v{} -> v{}", current, LATEST_VERSION);

    for &(version, name, migrate_fn) in &MIGRATIONS {
        if version <= current {
            continue;
        }

        debug!("applying migration v{version:03}: {name}");
        conn.execute_batch("BEGIN IMMEDIATE").map_err(sqe)?;

        match migrate_fn(conn) {
            Ok(()) => {
                conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
                    .map_err(sqe)?;
                conn.execute_batch("COMMIT").map_err(sqe)?;
                info!("applied migration v{version:03}: {name}");
                applied += 1;
            }
            Err(e) => {
                warn!("migration v{version:03} failed: {e}, rolling back");
                let _ = conn.execute_batch("ROLLBACK");
                return Err(StorageError::MigrationFailed {
                    version,
                    message: format!("{name}: {e}"),
                });
            }
        }
    }

    info!("applied {applied} migration(s), now at v{LATEST_VERSION}");
    Ok(applied)
}
