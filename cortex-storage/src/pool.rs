//! Connection management: `ReadPool` (N read-only connections, round-robin)
//! and `WriteConnection` (the single writer actor — one dedicated thread
//! owning the only read-write handle, fed through a channel).
//!
//! `rusqlite::Connection` is `!Sync`, so the writer cannot be shared
//! directly across async tasks; instead a background OS thread owns it
//! and receives boxed closures to run against it, replying through a
//! oneshot channel. This gives linearizable commits without locking.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::Connection;
use tokio::sync::{mpsc, oneshot};

use cortex_core::errors::CortexResult;

use crate::to_storage_err;

/// Default number of reader connections when not configured.
const DEFAULT_READ_POOL_SIZE: usize = 4;

fn configure_connection(conn: &Connection, busy_timeout_ms: u64) -> CortexResult<()> {
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.pragma_update(None, "synchronous", "NORMAL")
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.busy_timeout(std::time::Duration::from_millis(busy_timeout_ms))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Round-robin pool of read-only connections.
pub struct ReadPool {
    readers: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    pub fn open(path: &Path, size: usize, busy_timeout_ms: u64) -> CortexResult<Self> {
        let size = if size == 0 { DEFAULT_READ_POOL_SIZE } else { size };
        let mut readers = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            configure_connection(&conn, busy_timeout_ms)?;
            readers.push(Mutex::new(conn));
        }
        Ok(Self { readers, next: AtomicUsize::new(0) })
    }

    /// In-memory pool for tests: a single connection shared as both the
    /// "pool" and the writer's backing store (via a shared-cache URI).
    pub fn open_in_memory_shared(uri: &str, size: usize, busy_timeout_ms: u64) -> CortexResult<Self> {
        let size = if size == 0 { DEFAULT_READ_POOL_SIZE } else { size };
        let mut readers = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                uri,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            conn.busy_timeout(std::time::Duration::from_millis(busy_timeout_ms))
                .map_err(|e| to_storage_err(e.to_string()))?;
            readers.push(Mutex::new(conn));
        }
        Ok(Self { readers, next: AtomicUsize::new(0) })
    }

    /// Run a closure against one pooled read connection.
    pub fn with_conn<F, T>(&self, f: F) -> CortexResult<T>
    where
        F: FnOnce(&Connection) -> CortexResult<T>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[idx]
            .lock()
            .map_err(|e| to_storage_err(format!("reader lock poisoned: {e}")))?;
        f(&conn)
    }

    pub fn size(&self) -> usize {
        self.readers.len()
    }
}

type WriteJob = Box<dyn FnOnce(&Connection) + Send>;

/// The single writer actor: one OS thread owns the only read-write
/// `Connection`. Callers submit closures and await the reply.
pub struct WriteConnection {
    tx: mpsc::UnboundedSender<WriteJob>,
}

impl WriteConnection {
    pub fn open(path: &Path, busy_timeout_ms: u64) -> CortexResult<Self> {
        let path = path.to_path_buf();
        let (tx, rx) = mpsc::unbounded_channel::<WriteJob>();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<CortexResult<()>>();

        std::thread::Builder::new()
            .name("cortex-storage-writer".into())
            .spawn(move || Self::run(path, busy_timeout_ms, rx, ready_tx))
            .map_err(|e| to_storage_err(format!("spawn writer thread: {e}")))?;

        ready_rx
            .recv()
            .map_err(|e| to_storage_err(format!("writer thread init: {e}")))??;

        Ok(Self { tx })
    }

    pub fn open_in_memory_shared(uri: &str, busy_timeout_ms: u64) -> CortexResult<Self> {
        let path = std::path::PathBuf::from(uri);
        let (tx, rx) = mpsc::unbounded_channel::<WriteJob>();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<CortexResult<()>>();

        std::thread::Builder::new()
            .name("cortex-storage-writer".into())
            .spawn(move || Self::run_uri(path, busy_timeout_ms, rx, ready_tx))
            .map_err(|e| to_storage_err(format!("spawn writer thread: {e}")))?;

        ready_rx
            .recv()
            .map_err(|e| to_storage_err(format!("writer thread init: {e}")))??;

        Ok(Self { tx })
    }

    fn run(
        path: std::path::PathBuf,
        busy_timeout_ms: u64,
        mut rx: mpsc::UnboundedReceiver<WriteJob>,
        ready_tx: std::sync::mpsc::Sender<CortexResult<()>>,
    ) {
        let conn = match Connection::open(&path).map_err(|e| to_storage_err(e.to_string())) {
            Ok(c) => c,
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };
        if let Err(e) = configure_connection(&conn, busy_timeout_ms) {
            let _ = ready_tx.send(Err(e));
            return;
        }
        let _ = ready_tx.send(Ok(()));

        while let Some(job) = rx.blocking_recv() {
            job(&conn);
        }
    }

    fn run_uri(
        uri: std::path::PathBuf,
        busy_timeout_ms: u64,
        mut rx: mpsc::UnboundedReceiver<WriteJob>,
        ready_tx: std::sync::mpsc::Sender<CortexResult<()>>,
    ) {
        let uri_str = uri.to_string_lossy().to_string();
        let conn = match Connection::open_with_flags(
            &uri_str,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| to_storage_err(e.to_string()))
        {
            Ok(c) => c,
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };
        if conn.busy_timeout(std::time::Duration::from_millis(busy_timeout_ms)).is_err() {
            // non-fatal
        }
        let _ = ready_tx.send(Ok(()));

        while let Some(job) = rx.blocking_recv() {
            job(&conn);
        }
    }

    /// Run a closure against the writer connection and await its result.
    pub async fn with_conn<F, T>(&self, f: F) -> CortexResult<T>
    where
        F: FnOnce(&Connection) -> CortexResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: WriteJob = Box::new(move |conn| {
            let result = f(conn);
            let _ = reply_tx.send(result);
        });
        self.tx
            .send(job)
            .map_err(|_| to_storage_err("writer actor has shut down".to_string()))?;
        reply_rx
            .await
            .map_err(|_| to_storage_err("writer actor dropped the reply channel".to_string()))?
    }
}
