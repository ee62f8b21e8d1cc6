//! `scan_history` retention: every completed scan appends a row, and
//! nothing ever prunes them on its own — left unchecked the table grows
//! without bound on a project that scans on every commit.

use drift_core::config::RetentionConfig;
use drift_core::errors::StorageError;
use rusqlite::Connection;
use tracing::debug;

use crate::queries::scan_history;

/// Outcome of one retention pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionResult {
    pub scans_removed: usize,
}

/// Keep only `config.max_scan_history_entries` most recent scan records.
/// Called after each scan completes, not on a separate schedule — cheap
/// enough (`DELETE ... WHERE id NOT IN (... LIMIT n)`) to run every time.
pub fn apply_retention_policy(conn: &Connection, config: &RetentionConfig) -> Result<RetentionResult, StorageError> {
    let removed = scan_history::prune_keep_most_recent(conn, config.max_scan_history_entries)?;
    if removed > 0 {
        debug!(removed, kept = config.max_scan_history_entries, "pruned scan_history");
    }
    Ok(RetentionResult { scans_removed: removed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabaseManager;

    #[test]
    fn prunes_down_to_configured_limit() {
        let db = DatabaseManager::open_in_memory().unwrap();
        db.with_reader(|conn| {
            for i in 0..10 {
                scan_history::insert_scan_start(conn, i, "/repo").unwrap();
            }
            Ok(())
        })
        .unwrap();

        db.with_reader(|conn| {
            let result = apply_retention_policy(conn, &RetentionConfig { max_scan_history_entries: 3 }).unwrap();
            assert_eq!(result.scans_removed, 7);
            assert_eq!(scan_history::count_scans(conn).unwrap(), 3);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn no_op_under_the_limit() {
        let db = DatabaseManager::open_in_memory().unwrap();
        db.with_reader(|conn| {
            scan_history::insert_scan_start(conn, 1, "/repo").unwrap();
            let result = apply_retention_policy(conn, &RetentionConfig::default()).unwrap();
            assert_eq!(result.scans_removed, 0);
            Ok(())
        })
        .unwrap();
    }
}
