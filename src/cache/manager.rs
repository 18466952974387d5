//! Bounded cache of parsed weather files
//!
//! Provides a `ContentCache` that maps file names to parsed JSON and evicts
//! in insertion order once it holds more than its capacity.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use super::clock::{InsertionClock, SequenceClock};

/// Number of files kept in memory unless configured otherwise
pub const DEFAULT_CAPACITY: usize = 100;

/// A cached file and the stamp it was inserted with
#[derive(Debug)]
struct CacheEntry {
    value: Arc<Value>,
    stamp: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    /// (stamp, key) pairs; the first element is the next eviction victim
    order: BTreeSet<(u64, String)>,
    stats: CacheStats,
}

/// Counters describing cache effectiveness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// In-memory cache of parsed weather files
///
/// All reads and writes go through one mutex, which is never held while a
/// loader runs. Two concurrent misses on the same key may both load; the
/// second insert only replaces the value.
pub struct ContentCache {
    capacity: usize,
    clock: Arc<dyn InsertionClock>,
    state: Mutex<CacheState>,
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

impl ContentCache {
    /// Creates a cache holding at most `capacity` files (at least one)
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(capacity, Arc::new(SequenceClock::new()))
    }

    /// Creates a cache that stamps insertions with the given clock
    pub fn with_clock(capacity: usize, clock: Arc<dyn InsertionClock>) -> Self {
        Self {
            capacity: capacity.max(1),
            clock,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.lock().entries.contains_key(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats
    }

    /// Returns the cached value for `key` without touching its eviction order
    pub fn get(&self, key: &str) -> Option<Arc<Value>> {
        self.state.lock().entries.get(key).map(|entry| entry.value.clone())
    }

    /// Inserts a value, evicting the oldest insertions while over capacity
    ///
    /// Re-inserting an existing key replaces its value but keeps its original
    /// position in the eviction order.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Arc<Value> {
        let value = Arc::new(value);
        let mut state = self.state.lock();
        self.insert_locked(&mut state, key.into(), value.clone());
        value
    }

    /// Returns the cached value for `key`, running `loader` on a miss
    ///
    /// # Arguments
    /// * `key` - File name
    /// * `loader` - Reads and parses the file from the backing store
    ///
    /// # Returns
    /// * `Ok(Arc<Value>)` - Cached or freshly loaded content
    /// * `Err(E)` - The loader's error; errors are never cached, so a
    ///   missing file is looked up again on every call
    pub async fn get_or_load<F, Fut, E>(&self, key: &str, loader: F) -> Result<Arc<Value>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        {
            let mut state = self.state.lock();
            if let Some(value) = state.entries.get(key).map(|entry| entry.value.clone()) {
                state.stats.hits += 1;
                tracing::debug!(key, "content cache hit");
                return Ok(value);
            }
            state.stats.misses += 1;
        }

        tracing::debug!(key, "content cache miss");
        let value = Arc::new(loader().await?);

        let mut state = self.state.lock();
        self.insert_locked(&mut state, key.to_string(), value.clone());
        Ok(value)
    }

    fn insert_locked(&self, state: &mut CacheState, key: String, value: Arc<Value>) {
        if let Some(entry) = state.entries.get_mut(&key) {
            entry.value = value;
            return;
        }

        let stamp = self.clock.next_stamp();
        state.order.insert((stamp, key.clone()));
        state.entries.insert(key, CacheEntry { value, stamp });

        while state.entries.len() > self.capacity {
            let Some((_, oldest)) = state.order.pop_first() else {
                break;
            };
            if let Some(evicted) = state.entries.remove(&oldest) {
                state.stats.evictions += 1;
                tracing::debug!(key = %oldest, stamp = evicted.stamp, "content cache eviction");
            }
        }
    }
}
