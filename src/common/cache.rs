use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Process-wide keyed cache with per-entry expiry.
///
/// Entries are `{ value, expires_at }`; expired entries are dropped on
/// read. Callers invalidate or refresh explicitly, there is no
/// background sweeper.
#[derive(Clone)]
pub struct TtlCache<V> {
    entries: Arc<Mutex<HashMap<String, Entry<V>>>>,
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: &str, value: V, ttl: Duration) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    /// Replace the entry for `key` with a freshly computed value,
    /// regardless of whether the old one had expired.
    pub async fn refresh<F, Fut>(&self, key: &str, ttl: Duration, produce: F) -> anyhow::Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<V>>,
    {
        let value = produce().await?;
        self.insert(key, value.clone(), ttl);
        Ok(value)
    }

    /// Return the cached value, or compute, store and return it.
    pub async fn get_or_refresh<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        produce: F,
    ) -> anyhow::Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<V>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        self.refresh(key, ttl, produce).await
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let cache: TtlCache<i32> = TtlCache::new();
        assert_eq!(cache.get("news"), None);
    }

    #[test]
    fn insert_then_get() {
        let cache = TtlCache::new();
        cache.insert("news", 7, Duration::from_secs(60));
        assert_eq!(cache.get("news"), Some(7));
    }

    #[test]
    fn expired_entry_misses() {
        let cache = TtlCache::new();
        cache.insert("news", 7, Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("news"), None);
    }

    #[test]
    fn invalidate_removes() {
        let cache = TtlCache::new();
        cache.insert("news", 7, Duration::from_secs(60));
        cache.invalidate("news");
        assert_eq!(cache.get("news"), None);
    }

    #[tokio::test]
    async fn refresh_replaces_live_entry() {
        let cache = TtlCache::new();
        cache.insert("news", 1, Duration::from_secs(60));
        let value = cache
            .refresh("news", Duration::from_secs(60), || async { Ok(2) })
            .await
            .unwrap();
        assert_eq!(value, 2);
        assert_eq!(cache.get("news"), Some(2));
    }

    #[tokio::test]
    async fn get_or_refresh_prefers_cached() {
        let cache = TtlCache::new();
        cache.insert("news", 1, Duration::from_secs(60));
        let value = cache
            .get_or_refresh("news", Duration::from_secs(60), || async {
                panic!("should not recompute a live entry")
            })
            .await
            .unwrap();
        assert_eq!(value, 1);
    }
}
