//! Errors surfaced by the extraction, resolution, boundary, and detection
//! stages (spec.md §4.2, §4.4, §7).

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unsupported file extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("syntax error in {path} at line {line}: {message}")]
    SyntaxError {
        path: String,
        line: u32,
        message: String,
    },

    #[error("tree-sitter failed to produce a parse tree for {path}")]
    TreeSitterFailure { path: String },
}

impl DriftErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => "PARSE_UNSUPPORTED_LANGUAGE",
            Self::SyntaxError { .. } => "PARSE_SYNTAX_ERROR",
            Self::TreeSitterFailure { .. } => "PARSE_TREE_SITTER_FAILURE",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CallGraphError {
    #[error("function {id} referenced by an edge does not exist in the graph")]
    DanglingFunctionRef { id: i64 },

    #[error("resolution ambiguous for {callee_name}: {candidate_count} candidates")]
    AmbiguousResolution {
        callee_name: String,
        candidate_count: usize,
    },

    #[error("{0}")]
    Storage(#[from] super::storage_error::StorageError),
}

impl DriftErrorCode for CallGraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DanglingFunctionRef { .. } => "CALLGRAPH_DANGLING_REF",
            Self::AmbiguousResolution { .. } => "CALLGRAPH_AMBIGUOUS",
            Self::Storage(e) => e.error_code(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("unrecognized ORM framework signature in {file}")]
    UnrecognizedFramework { file: String },

    #[error("{0}")]
    Storage(#[from] super::storage_error::StorageError),
}

impl DriftErrorCode for BoundaryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnrecognizedFramework { .. } => "BOUNDARY_UNRECOGNIZED_FRAMEWORK",
            Self::Storage(e) => e.error_code(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("detector {detector_id} panicked or returned malformed output: {message}")]
    DetectorFailed {
        detector_id: String,
        message: String,
    },

    #[error("{0}")]
    Storage(#[from] super::storage_error::StorageError),
}

impl DriftErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DetectorFailed { .. } => "DETECTION_FAILED",
            Self::Storage(e) => e.error_code(),
        }
    }
}
