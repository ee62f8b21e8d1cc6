//! # drift-storage
//!
//! SQLite persistence layer for the Drift analysis engine.
//! WAL mode, write-serialized + read-pooled, batch writer,
//! keyset pagination, schema migrations.

pub mod connection;
pub mod batch;
pub mod engine;
pub mod migrations;
pub mod queries;
pub mod pagination;
pub mod materialized;
pub mod retention;

pub use connection::DatabaseManager;
pub use batch::BatchWriter;
pub use engine::DriftStorageEngine;
