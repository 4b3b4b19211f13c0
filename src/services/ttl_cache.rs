//! Expiring memoization for upstream sources
//!
//! Each source owns one [`TtlCache`]; the key is the argument tuple of the
//! cached call. Entries are replaced lazily: an expired entry stays in the map
//! until the next access for its key recomputes it.
//!
//! The lock is never held while computing, so two requests that miss at the
//! same moment may both fetch. The last writer wins and the map stays
//! consistent.

use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

#[derive(Clone, Debug)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Snapshot of cache activity for the health endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

pub struct TtlCache<K, V> {
    name: &'static str,
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, or run `compute` and store its result for `ttl`
    pub async fn get_or_compute<F, Fut>(&self, key: K, ttl: Duration, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                if Instant::now() < entry.expires_at {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return entry.value.clone();
                }
                debug!(cache = self.name, key = ?key, "Cache entry expired");
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute().await;

        let entry = CacheEntry {
            value: value.clone(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key, entry);

        value
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.read().await.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
