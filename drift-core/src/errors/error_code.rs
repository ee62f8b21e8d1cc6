//! Stable error-code strings, independent of the `Display` message.
//! The MCP server and CLI `--json` output key off these, so the wording of an
//! error's `#[error("...")]` message can change without breaking a consumer's
//! `match error_code { ... }`.

/// Any Drift error can be reduced to a stable, machine-matchable code.
pub trait DriftErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const DB_BUSY: &str = "DB_BUSY";
pub const DB_CORRUPT: &str = "DB_CORRUPT";
pub const DISK_FULL: &str = "DISK_FULL";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
