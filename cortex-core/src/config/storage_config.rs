//! Storage subsystem configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the SQLite-backed storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file. Defaults to `.cortex/cortex.db`
    /// relative to the workspace root.
    pub db_path: String,
    /// Size of the read connection pool.
    pub read_pool_size: usize,
    /// Busy timeout for SQLite lock contention, in milliseconds.
    pub busy_timeout_ms: u64,
    /// Maximum number of versions retained per memory before old ones are pruned.
    pub max_versions_per_memory: i64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: ".cortex/cortex.db".to_string(),
            read_pool_size: 4,
            busy_timeout_ms: 5000,
            max_versions_per_memory: 50,
        }
    }
}
