//! `DatabaseManager` — opens the drift.db connection, applies pragmas, and
//! runs migrations. Reads and the batch writer's single write connection
//! both go through WAL, so they never block each other (spec.md §4.3
//! `CG.StreamingBuild` is the only writer).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use drift_core::errors::StorageError;

use crate::migrations;

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

fn configure(conn: &Connection) -> Result<(), StorageError> {
    conn.pragma_update(None, "journal_mode", "WAL").map_err(sqe)?;
    conn.pragma_update(None, "synchronous", "NORMAL").map_err(sqe)?;
    conn.pragma_update(None, "foreign_keys", true).map_err(sqe)?;
    conn.busy_timeout(std::time::Duration::from_millis(5_000)).map_err(sqe)?;
    Ok(())
}

static MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Backing store for a [`DatabaseManager`]: a real file, or a named
/// shared-cache in-memory database that a second connection can attach to.
enum Backing {
    File(PathBuf),
    Memory(String),
}

/// Owns the reader connection used for every `IDrift*` trait query. The
/// batch writer opens its own separate connection (see
/// [`DatabaseManager::open_batch_connection`]) so reads are never blocked
/// behind a pending write transaction.
pub struct DatabaseManager {
    backing: Backing,
    reader: Mutex<Connection>,
}

impl DatabaseManager {
    /// Open (creating if absent) the database at `path`, applying pragmas
    /// and running pending migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(sqe)?;
        configure(&conn)?;
        let applied = migrations::run_migrations(&conn)?;
        debug!(path = %path.display(), applied, "opened drift database");
        Ok(Self { backing: Backing::File(path.to_path_buf()), reader: Mutex::new(conn) })
    }

    /// In-memory database for tests. Uses a uniquely-named shared cache so
    /// [`Self::open_batch_connection`] can hand the batch writer a second
    /// connection onto the same schema and rows.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let name = format!(
            "drift-storage-{}-{}",
            std::process::id(),
            MEMORY_DB_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        let uri = format!("file:{name}?mode=memory&cache=shared");
        let conn = Connection::open_with_flags(
            &uri,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(sqe)?;
        conn.pragma_update(None, "foreign_keys", true).map_err(sqe)?;
        migrations::run_migrations(&conn)?;
        Ok(Self { backing: Backing::Memory(uri), reader: Mutex::new(conn) })
    }

    /// A second connection onto the same database, handed to the batch
    /// writer thread. For a file-backed database this reopens the path
    /// (WAL allows concurrent readers + one writer); for an in-memory
    /// database this reopens the same shared-cache URI.
    pub fn open_batch_connection(&self) -> Result<Connection, StorageError> {
        match &self.backing {
            Backing::File(path) => {
                let conn = Connection::open(path).map_err(sqe)?;
                configure(&conn)?;
                Ok(conn)
            }
            Backing::Memory(uri) => {
                let conn = Connection::open_with_flags(
                    uri,
                    OpenFlags::SQLITE_OPEN_READ_WRITE
                        | OpenFlags::SQLITE_OPEN_CREATE
                        | OpenFlags::SQLITE_OPEN_URI,
                )
                .map_err(sqe)?;
                conn.pragma_update(None, "foreign_keys", true).map_err(sqe)?;
                Ok(conn)
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::File(p) => Some(p.as_path()),
            Backing::Memory(_) => None,
        }
    }

    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.reader.lock().map_err(|e| sqe(format!("reader lock poisoned: {e}")))?;
        f(&conn)
    }

    /// Writes issued directly against the reader connection — used for
    /// in-memory databases and for operations the batch writer doesn't
    /// cover (workspace maintenance: gc, backup, schema checks).
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.reader.lock().map_err(|e| sqe(format!("writer lock poisoned: {e}")))?;
        f(&conn)
    }

    /// Force a WAL checkpoint, folding the write-ahead log back into the
    /// main database file.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_reader(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)").map_err(sqe)
        })
    }

    pub fn schema_version(&self) -> Result<u32, StorageError> {
        self.with_reader(|conn| migrations::current_version(conn))
    }
}
