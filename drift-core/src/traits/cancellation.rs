//! Cooperative cancellation for long-running traversals and queries.
//!
//! Every BFS frontier expansion and every 1k-row store scan checks a
//! `CancellationToken` rather than a deadline — the caller (CLI, MCP
//! server) owns timeouts; the core only ever asks "should I stop now".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cheaply cloneable flag that a caller can set to ask a running
/// traversal or query to stop at its next checkpoint.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A token that never cancels. Used where an API takes a token but the
    /// caller has no cancellation policy of its own.
    pub fn never() -> Self {
        Self::new()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_cancelled() {
        assert!(!CancellationToken::new().is_cancelled());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
