use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one session-mutating operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Monotonic counter of session-mutating operations.
///
/// Results tagged with anything but the latest generation are stale.
#[derive(Debug, Default)]
pub struct AttemptGenerations {
    latest: AtomicU64,
}

impl AttemptGenerations {
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }
}
