//! Snapshot module: creation, lookup, reconstruction, retention, triggers.

pub mod create;
pub mod lookup;
pub mod reconstruct;
pub mod retention;
pub mod triggers;
