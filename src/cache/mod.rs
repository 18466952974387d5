//! Cache module for stored file contents
//!
//! This module provides a bounded in-memory cache of parsed weather files,
//! keyed by file name. Once full, the entry inserted longest ago is evicted;
//! reading an entry does not change its eviction order.

mod clock;
mod manager;

pub use clock::{InsertionClock, SequenceClock};
pub use manager::{CacheStats, ContentCache, DEFAULT_CAPACITY};
