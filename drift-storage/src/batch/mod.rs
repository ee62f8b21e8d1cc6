//! Batched single-writer path: `commands::BatchCommand` describes the work,
//! `writer::BatchWriter` owns the thread and connection that applies it.

pub mod commands;
pub mod writer;

pub use commands::BatchCommand;
pub use writer::BatchWriter;
