//! v003: `pattern_status` — PATTERN's `discovered → approved → ignored`
//! lifecycle (spec.md §4.7), kept separate from `pattern_confidence` (the
//! Beta posterior) and `conventions.promotion_status` (the learning
//! subsystem's own promotion gate). `user_set` records whether a human
//! approved/ignored the pattern through `approve_pattern`, so the
//! auto-approval gate in `patterns::feedback` never overwrites it.

use rusqlite::Connection;

use drift_core::errors::StorageError;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS pattern_status (
            pattern_id   TEXT PRIMARY KEY,
            status       TEXT NOT NULL DEFAULT 'discovered',
            user_set     INTEGER NOT NULL DEFAULT 0,
            actor_id     TEXT,
            updated_at   INTEGER NOT NULL DEFAULT (strftime('%s','now'))
        );

        CREATE INDEX IF NOT EXISTS idx_pattern_status_status ON pattern_status(status);
        ",
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
