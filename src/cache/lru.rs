use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Hit/miss counters exposed for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute a fresh value.
    pub misses: u64,
    /// Entries dropped to respect the capacity bound.
    pub evictions: u64,
}

/// Bounded least-recently-used map.
///
/// Recency is tracked in a queue and refreshed on every hit. Lookups are op-level (one per
/// caption line or emoji), never per pixel, so the linear `touch` is acceptable.
pub struct LruCache<K, V> {
    capacity: usize,
    entries: HashMap<K, V>,
    recency: VecDeque<K>,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Create a cache holding at most `capacity` entries. Capacity 0 disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            recency: VecDeque::new(),
            stats: CacheStats::default(),
        }
    }

    /// Maximum retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Currently retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters since construction.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Look up `key`, refreshing its recency on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.entries.contains_key(key) {
            self.stats.hits += 1;
            self.touch(key);
            self.entries.get(key)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Insert or replace `key`, evicting the least recently used entries past capacity.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        self.entries.insert(key.clone(), value);
        self.touch(&key);
        while self.recency.len() > self.capacity {
            if let Some(old) = self.recency.pop_front() {
                self.entries.remove(&old);
                self.stats.evictions += 1;
            }
        }
    }

    /// Return the cached value for `key`, computing and caching it on a miss.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        make: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E>
    where
        V: Clone,
    {
        if let Some(v) = self.get(&key) {
            return Ok(v.clone());
        }
        let value = make()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            self.recency.remove(pos);
        }
        self.recency.push_back(key.clone());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/lru.rs"]
mod tests;
