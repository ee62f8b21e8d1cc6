//! `StorageEngine` — opens the Cortex SQLite store, runs pending
//! migrations, and hands out the writer actor and read pool every other
//! cortex crate consumes.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;

use cortex_core::config::StorageConfig;
use cortex_core::errors::CortexResult;

use crate::migrations;
use crate::pool::{ReadPool, WriteConnection};
use crate::recovery;
use crate::to_storage_err;

/// Owns the writer actor and read pool for one project's `.cortex/cortex.db`.
pub struct StorageEngine {
    pub writer: Arc<WriteConnection>,
    pub readers: Arc<ReadPool>,
}

impl StorageEngine {
    /// Open (creating if absent) the database at `config.db_path`, apply
    /// any pending migrations, then stand up the writer actor and read
    /// pool against the now-current schema.
    pub fn open(project_root: &Path, config: &StorageConfig) -> CortexResult<Self> {
        let db_path = project_root.join(&config.db_path);
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| to_storage_err(format!("create {parent:?}: {e}")))?;
        }

        recovery::recover_if_needed(&db_path)?;
        Self::run_migrations_with_backup(&db_path)?;

        let writer = Arc::new(WriteConnection::open(&db_path, config.busy_timeout_ms)?);
        let readers = Arc::new(ReadPool::open(
            &db_path,
            config.read_pool_size,
            config.busy_timeout_ms,
        )?);

        Ok(Self { writer, readers })
    }

    /// In-memory engine for tests: a single shared-cache database so the
    /// writer and every reader see the same state without touching disk.
    pub fn open_in_memory(config: &StorageConfig) -> CortexResult<Self> {
        let uri = format!(
            "file:cortex-mem-{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4()
        );

        {
            let setup = Connection::open_with_flags(
                &uri,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                    | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI,
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            migrations::run_migrations(&setup)?;
        }

        let writer = Arc::new(WriteConnection::open_in_memory_shared(
            &uri,
            config.busy_timeout_ms,
        )?);
        let readers = Arc::new(ReadPool::open_in_memory_shared(
            &uri,
            config.read_pool_size,
            config.busy_timeout_ms,
        )?);

        Ok(Self { writer, readers })
    }

    /// Run migrations on a short-lived setup connection, taking a backup
    /// of the pre-migration file first if the schema is actually behind
    /// (one auto-backup per upgrade, per the external-interfaces contract).
    fn run_migrations_with_backup(db_path: &Path) -> CortexResult<()> {
        let existed = db_path.exists();
        let setup = Connection::open(db_path).map_err(|e| to_storage_err(e.to_string()))?;
        let current = migrations::current_version(&setup)?;

        if existed && current > 0 && current < migrations::LATEST_VERSION {
            let backup_path = db_path.with_extension(format!("v{current}.bak"));
            std::fs::copy(db_path, &backup_path)
                .map_err(|e| to_storage_err(format!("backup before migration: {e}")))?;
            tracing::info!(
                from = current,
                to = migrations::LATEST_VERSION,
                backup = %backup_path.display(),
                "backing up cortex store before schema upgrade"
            );
        }

        migrations::run_migrations(&setup)?;
        Ok(())
    }
}
