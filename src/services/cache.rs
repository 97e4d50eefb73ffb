use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Thread-safe TTL cache for fetched candle series.
///
/// Entries expire lazily on read; concurrent request handlers share one
/// instance through the market data service.
pub struct Cache<V> {
    data: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V: Clone> Cache<V> {
    /// Create a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    /// Get a live value, dropping it if expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.expires_at > Instant::now() {
            Some(entry.value.clone())
        } else {
            drop(entry);
            self.data.remove(key);
            None
        }
    }

    /// Insert a value with the cache's TTL.
    pub fn set(&self, key: String, value: V) {
        self.data.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let cache = Cache::new(Duration::from_secs(60));
        cache.set("btc:1h".to_string(), vec![1.0, 2.0]);
        assert_eq!(cache.get("btc:1h"), Some(vec![1.0, 2.0]));
        assert_eq!(cache.get("eth:1h"), None);
    }

    #[test]
    fn test_entries_expire() {
        let cache = Cache::new(Duration::from_millis(10));
        cache.set("k".to_string(), 1u32);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }
}
