//! Insertion stamps for the content cache

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of insertion stamps
///
/// The cache evicts the entry with the smallest stamp first. Swapping the
/// clock lets tests pin the eviction order.
pub trait InsertionClock: Send + Sync {
    fn next_stamp(&self) -> u64;
}

/// Monotonically increasing counter, the default clock
#[derive(Debug, Default)]
pub struct SequenceClock {
    next: AtomicU64,
}

impl SequenceClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InsertionClock for SequenceClock {
    fn next_stamp(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
