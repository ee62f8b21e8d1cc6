//! v001: scanned files, the parse cache, functions, and call edges — the
//! tables `CG.StreamingBuild` and `CG.Resolver` write (spec.md §3, §4.3, §4.4).

use rusqlite::Connection;

use drift_core::errors::StorageError;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS file_metadata (
            path             TEXT PRIMARY KEY,
            language         TEXT,
            file_size        INTEGER NOT NULL,
            content_hash     BLOB NOT NULL,
            mtime_secs       INTEGER NOT NULL,
            mtime_nanos      INTEGER NOT NULL,
            last_scanned_at  INTEGER NOT NULL,
            scan_duration_us INTEGER,
            pattern_count    INTEGER NOT NULL DEFAULT 0,
            function_count   INTEGER NOT NULL DEFAULT 0,
            error_count      INTEGER NOT NULL DEFAULT 0,
            error            TEXT
        );

        CREATE TABLE IF NOT EXISTS parse_cache (
            content_hash      BLOB PRIMARY KEY,
            language          TEXT NOT NULL,
            parse_result_json TEXT NOT NULL,
            created_at        INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS functions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            file            TEXT NOT NULL,
            name            TEXT NOT NULL,
            qualified_name  TEXT,
            language        TEXT NOT NULL,
            line            INTEGER NOT NULL,
            end_line        INTEGER NOT NULL,
            parameter_count INTEGER NOT NULL,
            return_type     TEXT,
            is_exported     INTEGER NOT NULL,
            is_async        INTEGER NOT NULL,
            body_hash       BLOB,
            signature_hash  BLOB
        );

        CREATE INDEX IF NOT EXISTS idx_functions_file ON functions(file);
        CREATE INDEX IF NOT EXISTS idx_functions_qualified_name ON functions(qualified_name);

        -- CALL_EDGE (spec.md §3): callee_id is NULL until the resolver assigns
        -- it; an edge may remain permanently unresolved (first-class state).
        CREATE TABLE IF NOT EXISTS call_edges (
            caller_id      INTEGER NOT NULL,
            callee_id      INTEGER,
            callee_name    TEXT NOT NULL,
            call_kind      TEXT NOT NULL,
            resolution     TEXT NOT NULL,
            confidence     REAL NOT NULL,
            call_site_line INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_call_edges_caller ON call_edges(caller_id);
        CREATE INDEX IF NOT EXISTS idx_call_edges_callee ON call_edges(callee_id);
        CREATE INDEX IF NOT EXISTS idx_call_edges_unresolved ON call_edges(caller_id)
            WHERE callee_id IS NULL;

        CREATE TABLE IF NOT EXISTS scan_history (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at      INTEGER NOT NULL,
            completed_at    INTEGER,
            root_path       TEXT NOT NULL,
            total_files     INTEGER,
            added_files     INTEGER,
            modified_files  INTEGER,
            removed_files   INTEGER,
            unchanged_files INTEGER,
            duration_ms     INTEGER,
            status          TEXT NOT NULL,
            error           TEXT
        );
        ",
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
