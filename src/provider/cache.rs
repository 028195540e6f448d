use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CachedResponse {
    stored_at: Instant,
    body: Value,
}

/// Cache-aside store for decoded API responses with a fixed TTL.
/// A zero TTL disables caching entirely.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedResponse>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn key(endpoint: &str, params: &[(&str, String)]) -> String {
        let mut key = endpoint.to_string();
        for (name, value) in params {
            key.push('|');
            key.push_str(name);
            key.push('=');
            key.push_str(value);
        }
        key
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&self, key: String, body: Value) {
        self.insert_at(key, body, Instant::now());
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<Value> {
        if self.ttl.is_zero() {
            return None;
        }
        let mut entries = self.entries.lock().ok()?;
        let fresh = entries
            .get(key)
            .map(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)?;
        if fresh {
            tracing::debug!(key, "response cache hit");
            entries.get(key).map(|entry| entry.body.clone())
        } else {
            entries.remove(key);
            None
        }
    }

    fn insert_at(&self, key: String, body: Value, now: Instant) {
        if self.ttl.is_zero() {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key,
                CachedResponse {
                    stored_at: now,
                    body,
                },
            );
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_includes_query_parameters() {
        let plain = ResponseCache::key("/repos/a/b/issues", &[]);
        let open = ResponseCache::key("/repos/a/b/issues", &[("state", "open".to_string())]);
        assert_ne!(plain, open);
        assert_eq!(open, "/repos/a/b/issues|state=open");
    }

    #[test]
    fn fresh_entries_are_returned() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        let start = Instant::now();
        cache.insert_at("k".to_string(), json!({"stars": 3}), start);
        assert_eq!(
            cache.get_at("k", start + Duration::from_secs(299)),
            Some(json!({"stars": 3}))
        );
    }

    #[test]
    fn expired_entries_are_evicted_on_read() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        let start = Instant::now();
        cache.insert_at("k".to_string(), json!([1, 2]), start);
        assert!(cache.get_at("k", start + Duration::from_secs(300)).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn zero_ttl_disables_caching() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.insert("k".to_string(), json!(true));
        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 0);
    }
}
