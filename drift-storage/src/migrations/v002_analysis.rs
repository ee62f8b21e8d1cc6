//! v002: ORM boundaries, data access + sensitive-field classification,
//! pattern confidence/outliers/conventions, reachability/impact/coupling
//! caches, and the enforcement violations+feedback loop (spec.md §3, §4.6,
//! §4.7).

use rusqlite::Connection;

use drift_core::errors::StorageError;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS detections (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            file             TEXT NOT NULL,
            line             INTEGER NOT NULL,
            column_num       INTEGER NOT NULL,
            pattern_id       TEXT NOT NULL,
            category         TEXT NOT NULL,
            confidence       REAL NOT NULL,
            detection_method TEXT NOT NULL,
            cwe_ids          TEXT,
            owasp            TEXT,
            matched_text     TEXT,
            created_at       INTEGER NOT NULL DEFAULT (strftime('%s','now'))
        );

        CREATE INDEX IF NOT EXISTS idx_detections_file ON detections(file);
        CREATE INDEX IF NOT EXISTS idx_detections_category ON detections(category);
        CREATE INDEX IF NOT EXISTS idx_detections_pattern ON detections(pattern_id);

        -- ORM/framework boundary recognitions (spec.md §4.2 capability-set
        -- registry) feeding into data_access.
        CREATE TABLE IF NOT EXISTS boundaries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            file        TEXT NOT NULL,
            framework   TEXT NOT NULL,
            model_name  TEXT NOT NULL,
            table_name  TEXT,
            field_name  TEXT,
            sensitivity TEXT,
            confidence  REAL NOT NULL,
            created_at  INTEGER NOT NULL DEFAULT (strftime('%s','now'))
        );

        CREATE INDEX IF NOT EXISTS idx_boundaries_file ON boundaries(file);
        CREATE INDEX IF NOT EXISTS idx_boundaries_framework ON boundaries(framework);

        -- DATA_ACCESS (spec.md §3).
        CREATE TABLE IF NOT EXISTS data_access (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            function_id INTEGER NOT NULL,
            table_name  TEXT NOT NULL,
            operation   TEXT NOT NULL,
            fields      TEXT NOT NULL,
            orm         TEXT,
            line        INTEGER NOT NULL,
            confidence  REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_data_access_function ON data_access(function_id);
        CREATE INDEX IF NOT EXISTS idx_data_access_table ON data_access(table_name);

        -- SENSITIVE_FIELD (spec.md §3 — computed, not ingested).
        CREATE TABLE IF NOT EXISTS sensitive_fields (
            table_name  TEXT NOT NULL,
            field_name  TEXT NOT NULL,
            category    TEXT NOT NULL,
            specificity REAL NOT NULL,
            PRIMARY KEY (table_name, field_name)
        );

        -- PATTERN's Beta(alpha, beta) posterior (spec.md §4.7).
        CREATE TABLE IF NOT EXISTS pattern_confidence (
            pattern_id             TEXT PRIMARY KEY,
            alpha                  REAL NOT NULL,
            beta                   REAL NOT NULL,
            posterior_mean         REAL NOT NULL,
            credible_interval_low  REAL NOT NULL,
            credible_interval_high REAL NOT NULL,
            tier                   TEXT NOT NULL,
            momentum               TEXT NOT NULL,
            last_updated           INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pattern_confidence_tier ON pattern_confidence(tier, pattern_id);

        CREATE TABLE IF NOT EXISTS outliers (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            pattern_id       TEXT NOT NULL,
            file             TEXT NOT NULL,
            line             INTEGER NOT NULL,
            deviation_score  REAL NOT NULL,
            significance     TEXT NOT NULL,
            method           TEXT NOT NULL,
            created_at       INTEGER NOT NULL DEFAULT (strftime('%s','now'))
        );

        CREATE INDEX IF NOT EXISTS idx_outliers_pattern ON outliers(pattern_id);

        CREATE TABLE IF NOT EXISTS conventions (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            pattern_id        TEXT NOT NULL,
            category          TEXT NOT NULL,
            scope             TEXT NOT NULL,
            dominance_ratio   REAL NOT NULL,
            promotion_status  TEXT NOT NULL,
            discovered_at     INTEGER NOT NULL,
            last_seen         INTEGER NOT NULL,
            expires_at        INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_conventions_category ON conventions(category);

        -- CG.Reachability cache (spec.md §4.5).
        CREATE TABLE IF NOT EXISTS reachability_cache (
            source_node    TEXT NOT NULL,
            direction      TEXT NOT NULL,
            reachable_set  TEXT NOT NULL,
            sensitivity    TEXT NOT NULL,
            PRIMARY KEY (source_node, direction)
        );

        -- CG.Impact blast-radius scores (spec.md §4.6).
        CREATE TABLE IF NOT EXISTS impact_scores (
            function_id       INTEGER PRIMARY KEY,
            affected_count     INTEGER NOT NULL,
            entry_point_hits   INTEGER NOT NULL,
            sensitive_paths    INTEGER NOT NULL,
            depth              INTEGER NOT NULL,
            risk_score         REAL NOT NULL,
            risk_bucket        TEXT NOT NULL
        );

        -- CG.Coupling (spec.md §4.6).
        CREATE TABLE IF NOT EXISTS coupling_metrics (
            module       TEXT PRIMARY KEY,
            ce           INTEGER NOT NULL,
            ca           INTEGER NOT NULL,
            instability  REAL NOT NULL,
            abstractness REAL NOT NULL,
            distance     REAL NOT NULL,
            zone         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_coupling_metrics_zone ON coupling_metrics(zone);

        CREATE TABLE IF NOT EXISTS coupling_cycles (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            members           TEXT NOT NULL,
            break_suggestions TEXT NOT NULL,
            created_at        INTEGER NOT NULL DEFAULT (strftime('%s','now'))
        );

        -- VIOLATION (spec.md §3) and the feedback loop that updates its
        -- pattern's alpha/beta.
        CREATE TABLE IF NOT EXISTS violations (
            id                       TEXT PRIMARY KEY,
            pattern_id               TEXT NOT NULL,
            file                     TEXT NOT NULL,
            line                     INTEGER NOT NULL,
            severity                 TEXT NOT NULL,
            confidence_at_detection  REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_violations_file ON violations(file);
        CREATE INDEX IF NOT EXISTS idx_violations_pattern ON violations(pattern_id);

        CREATE TABLE IF NOT EXISTS feedback (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            violation_id TEXT NOT NULL,
            pattern_id   TEXT NOT NULL,
            action       TEXT NOT NULL,
            reason       TEXT,
            created_at   INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_feedback_pattern ON feedback(pattern_id);
        ",
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
