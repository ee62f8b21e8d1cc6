//! Fan-out dispatcher — broadcasts every event to a set of registered handlers.
//! Used by the CLI to drive a progress bar and the workspace context refresher
//! off the same scan pass without coupling them to each other.

use super::handler::DriftEventHandler;
use super::types::*;

#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Box<dyn DriftEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    pub fn register(&mut self, handler: Box<dyn DriftEventHandler>) {
        self.handlers.push(handler);
    }
}

impl DriftEventHandler for EventDispatcher {
    fn on_scan_started(&self, event: &ScanStartedEvent) {
        for h in &self.handlers {
            h.on_scan_started(event);
        }
    }

    fn on_scan_progress(&self, event: &ScanProgressEvent) {
        for h in &self.handlers {
            h.on_scan_progress(event);
        }
    }

    fn on_scan_error(&self, event: &ScanErrorEvent) {
        for h in &self.handlers {
            h.on_scan_error(event);
        }
    }

    fn on_scan_complete(&self, event: &ScanCompleteEvent) {
        for h in &self.handlers {
            h.on_scan_complete(event);
        }
    }

    fn on_call_graph_built(&self, event: &CallGraphBuiltEvent) {
        for h in &self.handlers {
            h.on_call_graph_built(event);
        }
    }

    fn on_pattern_discovered(&self, event: &PatternDiscoveredEvent) {
        for h in &self.handlers {
            h.on_pattern_discovered(event);
        }
    }

    fn on_pattern_approved(&self, event: &PatternApprovedEvent) {
        for h in &self.handlers {
            h.on_pattern_approved(event);
        }
    }

    fn on_boundary_discovered(&self, event: &BoundaryDiscoveredEvent) {
        for h in &self.handlers {
            h.on_boundary_discovered(event);
        }
    }
}
