//! Event payloads emitted during scanning, resolution, and pattern discovery.
//! Consumers (CLI progress bars, MCP notifications, workspace context refresh)
//! implement `DriftEventHandler` and receive these by reference.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ScanStartedEvent {
    pub root: PathBuf,
    pub file_count: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ScanProgressEvent {
    pub processed: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct ScanErrorEvent {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ScanCompleteEvent {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct CallGraphBuiltEvent {
    pub functions: usize,
    pub resolved_edges: usize,
    pub unresolved_edges: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct PatternDiscoveredEvent {
    pub pattern_id: String,
    pub category: String,
    pub confidence: f64,
    pub location_count: usize,
}

#[derive(Debug, Clone)]
pub struct PatternApprovedEvent {
    pub pattern_id: String,
    pub auto_approved: bool,
}

#[derive(Debug, Clone)]
pub struct BoundaryDiscoveredEvent {
    pub boundary_id: String,
    pub kind: String,
    pub file: String,
}
