//! Scan-local cancellation flag. Distinct from `drift_core::traits::CancellationToken`
//! (the cross-crate query-cancellation primitive) since a scan owns its own
//! atomic and resets it at the start of every `scan()` call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ScanCancellation {
    flag: Arc<AtomicBool>,
}

impl ScanCancellation {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub fn as_atomic(&self) -> &AtomicBool {
        &*self.flag
    }
}
