//! The `DriftEventHandler` trait — implemented by anything that wants to observe
//! scan and analysis progress. Every method has a no-op default so a consumer
//! only needs to override the events it cares about.

use super::types::*;

pub trait DriftEventHandler: Send + Sync {
    fn on_scan_started(&self, _event: &ScanStartedEvent) {}
    fn on_scan_progress(&self, _event: &ScanProgressEvent) {}
    fn on_scan_error(&self, _event: &ScanErrorEvent) {}
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {}

    fn on_call_graph_built(&self, _event: &CallGraphBuiltEvent) {}

    fn on_pattern_discovered(&self, _event: &PatternDiscoveredEvent) {}
    fn on_pattern_approved(&self, _event: &PatternApprovedEvent) {}

    fn on_boundary_discovered(&self, _event: &BoundaryDiscoveredEvent) {}
}

/// A handler that observes nothing. Useful where a `&dyn DriftEventHandler` is
/// required but the caller doesn't need progress reporting (batch jobs, tests).
pub struct NullEventHandler;

impl DriftEventHandler for NullEventHandler {}
