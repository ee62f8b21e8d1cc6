//! Errors surfaced by the scanner (spec.md §4.1).

use super::error_code::{self, DriftErrorCode};

/// Errors that can occur while walking a project root.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("root path does not exist or is not a directory: {path}")]
    InvalidRoot { path: String },

    #[error("failed to read directory entry: {message}")]
    WalkError { message: String },

    #[error("failed to read file {path}: {message}")]
    ReadError { path: String, message: String },
}

impl DriftErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRoot { .. } => "SCAN_INVALID_ROOT",
            Self::WalkError { .. } => "SCAN_WALK_ERROR",
            Self::ReadError { .. } => error_code::STORAGE_ERROR,
        }
    }
}
