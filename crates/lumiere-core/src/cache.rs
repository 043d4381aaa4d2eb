//! Generic keyed TTL cache.
//!
//! Expired entries are dropped two ways: an eviction task scheduled when the
//! entry is inserted, and a lazy expiry check on every read. The lazy check
//! is authoritative — a read never returns a value past its TTL even if the
//! eviction task has not run yet.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Shared, clonable in-process cache with per-entry TTL.
///
/// Clones share the same underlying map. Must be used from within a tokio
/// runtime — `insert` spawns the eviction task.
pub struct TtlCache<K, V> {
    entries: Arc<Mutex<HashMap<K, Entry<V>>>>,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    pub fn insert(&self, key: K, value: V, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries
            .lock()
            .unwrap()
            .insert(key.clone(), Entry { value, expires_at });

        // Eager eviction. Re-checks the deadline so a newer insert under the
        // same key survives a stale timer.
        let entries = Arc::clone(&self.entries);
        tokio::spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            let mut map = entries.lock().unwrap();
            if map
                .get(&key)
                .is_some_and(|entry| entry.is_expired(Instant::now()))
            {
                map.remove(&key);
            }
        });
    }

    /// Fetch a live entry. Expired entries are dropped and miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut map = self.entries.lock().unwrap();
        match map.get(key) {
            Some(entry) if !entry.is_expired(Instant::now()) => Some(entry.value.clone()),
            Some(_) => {
                map.remove(key);
                None
            }
            None => None,
        }
    }

    /// Whether a live entry exists for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Drop an entry, returning its value if it was still live.
    pub fn remove(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        self.entries
            .lock()
            .unwrap()
            .remove(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value)
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        let mut map = self.entries.lock().unwrap();
        map.retain(|_, entry| !entry.is_expired(now));
        map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of all live entries, in no particular order.
    pub fn keys(&self) -> Vec<K> {
        let now = Instant::now();
        let mut map = self.entries.lock().unwrap();
        map.retain(|_, entry| !entry.is_expired(now));
        map.keys().cloned().collect()
    }

    /// Memoization helper: return the cached value for `key`, or run `f`,
    /// cache its success for `ttl`, and return it. Errors are not cached.
    ///
    /// Concurrent misses for the same key each run `f`; last writer wins.
    pub async fn get_or_insert_with<F, Fut, E>(&self, key: K, ttl: Duration, f: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = f().await?;
        self.insert(key, value.clone(), ttl);
        Ok(value)
    }
}
