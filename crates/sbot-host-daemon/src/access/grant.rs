use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide grant policy. Deny-by-default, memory only.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct GrantStateStore {
    granted: Arc<AtomicBool>,
}

impl GrantStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag atomically and return the new value.
    pub fn toggle(&self) -> bool {
        !self.granted.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn current(&self) -> bool {
        self.granted.load(Ordering::Acquire)
    }
}
