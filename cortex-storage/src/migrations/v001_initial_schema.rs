//! v001: memories, their links, causal edges/evidence, audit log, and
//! version history. Every table a `BaseMemory` and its satellite rows
//! live in, short of the append-only event/snapshot tables (v002).

use rusqlite::Connection;

use cortex_core::errors::CortexResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> CortexResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS memories (
            id               TEXT PRIMARY KEY,
            memory_type      TEXT NOT NULL,
            content          TEXT NOT NULL,
            summary          TEXT NOT NULL,
            transaction_time TEXT NOT NULL,
            valid_time       TEXT NOT NULL,
            valid_until      TEXT,
            confidence       REAL NOT NULL,
            importance       TEXT NOT NULL,
            last_accessed    TEXT NOT NULL,
            access_count     INTEGER NOT NULL DEFAULT 0,
            tags             TEXT NOT NULL DEFAULT '[]',
            archived         INTEGER NOT NULL DEFAULT 0,
            superseded_by    TEXT,
            supersedes       TEXT,
            content_hash     TEXT NOT NULL,
            updated_at       TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_memories_type ON memories(memory_type);
        CREATE INDEX IF NOT EXISTS idx_memories_archived ON memories(archived);
        CREATE INDEX IF NOT EXISTS idx_memories_content_hash ON memories(content_hash);

        CREATE TABLE IF NOT EXISTS memory_patterns (
            memory_id    TEXT NOT NULL,
            pattern_id   TEXT NOT NULL,
            pattern_name TEXT NOT NULL,
            PRIMARY KEY (memory_id, pattern_id)
        );

        CREATE TABLE IF NOT EXISTS memory_constraints (
            memory_id       TEXT NOT NULL,
            constraint_id   TEXT NOT NULL,
            constraint_name TEXT NOT NULL,
            PRIMARY KEY (memory_id, constraint_id)
        );

        CREATE TABLE IF NOT EXISTS memory_files (
            memory_id    TEXT NOT NULL,
            file_path    TEXT NOT NULL,
            line_start   INTEGER NOT NULL,
            line_end     INTEGER NOT NULL,
            content_hash TEXT NOT NULL,
            PRIMARY KEY (memory_id, file_path, line_start)
        );

        CREATE TABLE IF NOT EXISTS memory_functions (
            memory_id     TEXT NOT NULL,
            function_name TEXT NOT NULL,
            file_path     TEXT NOT NULL,
            signature     TEXT NOT NULL,
            PRIMARY KEY (memory_id, function_name, file_path)
        );

        CREATE INDEX IF NOT EXISTS idx_memory_files_path ON memory_files(file_path);

        CREATE TABLE IF NOT EXISTS causal_edges (
            source_id  TEXT NOT NULL,
            target_id  TEXT NOT NULL,
            relation   TEXT NOT NULL,
            strength   REAL NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (source_id, target_id)
        );

        CREATE INDEX IF NOT EXISTS idx_causal_edges_target ON causal_edges(target_id);

        CREATE TABLE IF NOT EXISTS causal_evidence (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            source_id   TEXT NOT NULL,
            target_id   TEXT NOT NULL,
            description TEXT NOT NULL,
            source      TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            FOREIGN KEY (source_id, target_id) REFERENCES causal_edges(source_id, target_id)
                ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_causal_evidence_edge
            ON causal_evidence(source_id, target_id);

        CREATE TABLE IF NOT EXISTS memory_audit_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            memory_id TEXT NOT NULL,
            operation TEXT NOT NULL,
            details   TEXT NOT NULL,
            actor     TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_audit_memory ON memory_audit_log(memory_id);
        CREATE INDEX IF NOT EXISTS idx_audit_time ON memory_audit_log(timestamp);
        CREATE INDEX IF NOT EXISTS idx_audit_actor ON memory_audit_log(actor);

        CREATE TABLE IF NOT EXISTS memory_versions (
            memory_id   TEXT NOT NULL,
            version     INTEGER NOT NULL,
            content     TEXT NOT NULL,
            summary     TEXT NOT NULL,
            confidence  REAL NOT NULL,
            changed_by  TEXT NOT NULL,
            reason      TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (memory_id, version)
        );

        CREATE TABLE IF NOT EXISTS provenance_hops (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            memory_id        TEXT NOT NULL,
            agent_id         TEXT NOT NULL,
            action           TEXT NOT NULL,
            timestamp        TEXT NOT NULL,
            confidence_delta REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_provenance_memory ON provenance_hops(memory_id, timestamp);

        CREATE TABLE IF NOT EXISTS agent_vector_clocks (
            owner_agent_id TEXT NOT NULL,
            agent_id       TEXT NOT NULL,
            counter        INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (owner_agent_id, agent_id)
        );

        CREATE TABLE IF NOT EXISTS agent_trust (
            observer_id  TEXT NOT NULL,
            subject_id   TEXT NOT NULL,
            validated    INTEGER NOT NULL DEFAULT 0,
            useful       INTEGER NOT NULL DEFAULT 0,
            contradicted INTEGER NOT NULL DEFAULT 0,
            total        INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (observer_id, subject_id)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
