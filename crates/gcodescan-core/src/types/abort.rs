//! Cooperative cancellation flag

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared abort indicator for a running scan
///
/// Cloning yields another handle to the same flag, so a caller can keep one
/// clone and hand another to the analyzer running on a worker thread. The
/// scan only looks at the flag between lines.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    /// Create a handle in the "not aborted" state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn abort(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear a previous request so the handle can be reused for another run
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
