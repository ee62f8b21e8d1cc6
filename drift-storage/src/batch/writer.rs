//! Dedicated writer thread with crossbeam-channel bounded(1024).
//! Batches writes into single transactions for throughput (spec.md §4.3
//! `CG.StreamingBuild` — single writer, batched atomic transactions).

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use rusqlite::Connection;
use tracing::{debug, warn};

use drift_core::errors::StorageError;
use drift_core::traits::storage::drift_batch::WriteStats;

use super::commands::{self, BatchCommand};

pub(crate) const CHANNEL_BOUND: usize = 1024;
pub(crate) const BATCH_SIZE: usize = 500;
const FLUSH_TIMEOUT: Duration = Duration::from_millis(100);

enum Job {
    Command(BatchCommand),
    Flush(Option<std::sync::mpsc::SyncSender<Result<WriteStats, StorageError>>>),
    Shutdown(std::sync::mpsc::SyncSender<Result<WriteStats, StorageError>>),
}

/// Owns the single write connection. All mutations to drift.db funnel
/// through this one thread, in commit order, one transaction per batch.
pub struct BatchWriter {
    tx: Sender<Job>,
    handle: Option<JoinHandle<()>>,
    shared_stats: Arc<Mutex<WriteStats>>,
}

impl BatchWriter {
    pub fn new(conn: Connection) -> Self {
        let (tx, rx) = bounded::<Job>(CHANNEL_BOUND);
        let shared_stats = Arc::new(Mutex::new(WriteStats::default()));
        let thread_stats = Arc::clone(&shared_stats);
        let handle = thread::Builder::new()
            .name("drift-storage-writer".into())
            .spawn(move || writer_loop(conn, rx, thread_stats))
            .expect("spawn drift-storage writer thread");
        Self { tx, handle: Some(handle), shared_stats }
    }

    /// Current cumulative write statistics, without forcing a flush.
    pub fn stats(&self) -> WriteStats {
        self.shared_stats.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn send(&self, command: BatchCommand) -> Result<(), StorageError> {
        self.tx
            .send(Job::Command(command))
            .map_err(|_| StorageError::SqliteError { message: "writer thread gone".into() })
    }

    /// Fire-and-forget flush — does not block on completion.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.tx
            .send(Job::Flush(None))
            .map_err(|_| StorageError::SqliteError { message: "writer thread gone".into() })
    }

    /// Flush and block until the writer has drained and committed.
    pub fn flush_sync(&self) -> Result<WriteStats, StorageError> {
        let (reply_tx, reply_rx) = std::sync::mpsc::sync_channel(0);
        self.tx
            .send(Job::Flush(Some(reply_tx)))
            .map_err(|_| StorageError::SqliteError { message: "writer thread gone".into() })?;
        reply_rx
            .recv()
            .map_err(|_| StorageError::SqliteError { message: "writer thread dropped reply".into() })?
    }

    pub fn shutdown(mut self) -> Result<WriteStats, StorageError> {
        let (reply_tx, reply_rx) = std::sync::mpsc::sync_channel(0);
        self.tx
            .send(Job::Shutdown(reply_tx))
            .map_err(|_| StorageError::SqliteError { message: "writer thread gone".into() })?;
        let result = reply_rx
            .recv()
            .map_err(|_| StorageError::SqliteError { message: "writer thread dropped reply".into() })?;
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
        result
    }
}

impl Drop for BatchWriter {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.tx.send(Job::Flush(None));
        }
    }
}

fn writer_loop(conn: Connection, rx: Receiver<Job>, shared_stats: Arc<Mutex<WriteStats>>) {
    let mut stats = WriteStats::default();
    let mut buffer: Vec<BatchCommand> = Vec::with_capacity(BATCH_SIZE);

    let sync = |stats: &WriteStats| {
        if let Ok(mut s) = shared_stats.lock() {
            *s = stats.clone();
        }
    };

    loop {
        match rx.recv_timeout(FLUSH_TIMEOUT) {
            Ok(Job::Command(cmd)) => {
                buffer.push(cmd);
                if buffer.len() >= BATCH_SIZE {
                    flush_buffer(&conn, &mut buffer, &mut stats);
                    sync(&stats);
                }
            }
            Ok(Job::Flush(reply)) => {
                flush_buffer(&conn, &mut buffer, &mut stats);
                sync(&stats);
                if let Some(reply) = reply {
                    let _ = reply.send(Ok(stats.clone()));
                }
            }
            Ok(Job::Shutdown(reply)) => {
                flush_buffer(&conn, &mut buffer, &mut stats);
                sync(&stats);
                let _ = reply.send(Ok(stats.clone()));
                debug!("drift-storage writer thread shutting down");
                return;
            }
            Err(RecvTimeoutError::Timeout) => {
                if !buffer.is_empty() {
                    flush_buffer(&conn, &mut buffer, &mut stats);
                    sync(&stats);
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                flush_buffer(&conn, &mut buffer, &mut stats);
                sync(&stats);
                return;
            }
        }
    }
}

fn flush_buffer(conn: &Connection, buffer: &mut Vec<BatchCommand>, stats: &mut WriteStats) {
    if buffer.is_empty() {
        return;
    }

    let result = (|| -> Result<(), StorageError> {
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
        for cmd in buffer.drain(..) {
            if let Err(e) = commands::apply(conn, cmd, stats) {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(e);
            }
        }
        conn.execute_batch("COMMIT")
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
        Ok(())
    })();

    if let Err(e) = result {
        warn!("drift-storage batch flush failed, transaction rolled back: {e}");
    }
}
