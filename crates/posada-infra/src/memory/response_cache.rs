//! In-memory TTL response cache.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use posada_core::router::ResponseCache;
use posada_types::config::EngineConfig;
use posada_types::response::RouteResponse;

struct CacheEntry {
    response: RouteResponse,
    inserted_at: Instant,
}

/// Bounded TTL cache of routed responses.
///
/// Entries expire `ttl` after insertion and are reaped lazily on the next
/// `get`. At capacity, the entry with the oldest insertion time is evicted
/// to make room.
pub struct InMemoryResponseCache {
    entries: DashMap<String, CacheEntry>,
    capacity: usize,
    ttl: Duration,
}

impl InMemoryResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            capacity,
            ttl,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_secs),
        )
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().inserted_at)
            .map(|entry| entry.key().clone());
        if let Some(key) = oldest {
            tracing::debug!(key, "cache at capacity, evicting oldest entry");
            self.entries.remove(&key);
        }
    }
}

impl ResponseCache for InMemoryResponseCache {
    fn get(&self, key: &str) -> Option<RouteResponse> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                return Some(entry.response.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    fn put(&self, key: String, response: RouteResponse) {
        if self.capacity == 0 {
            return;
        }
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.entries.insert(
            key,
            CacheEntry {
                response,
                inserted_at: Instant::now(),
            },
        );
    }

    fn evict(&self, key: &str) {
        self.entries.remove(key);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posada_types::response::ResponseSource;

    fn response(text: &str) -> RouteResponse {
        RouteResponse::ok(text, ResponseSource::Ai)
    }

    fn cache(capacity: usize) -> InMemoryResponseCache {
        InMemoryResponseCache::new(capacity, Duration::from_secs(300))
    }

    #[test]
    fn stores_and_returns_within_ttl() {
        let c = cache(10);
        c.put("s1:hola".to_string(), response("buenas"));
        assert_eq!(c.get("s1:hola").unwrap().response, "buenas");
    }

    #[test]
    fn expired_entries_are_reaped_on_read() {
        let c = InMemoryResponseCache::new(10, Duration::ZERO);
        c.put("s1:hola".to_string(), response("buenas"));
        assert!(c.get("s1:hola").is_none());
        assert!(c.is_empty());
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let c = cache(2);
        c.put("a".to_string(), response("1"));
        std::thread::sleep(Duration::from_millis(5));
        c.put("b".to_string(), response("2"));
        std::thread::sleep(Duration::from_millis(5));
        c.put("c".to_string(), response("3"));

        assert_eq!(c.len(), 2);
        assert!(c.get("a").is_none());
        assert!(c.get("b").is_some());
        assert!(c.get("c").is_some());
    }

    #[test]
    fn overwriting_a_key_does_not_evict() {
        let c = cache(2);
        c.put("a".to_string(), response("1"));
        c.put("b".to_string(), response("2"));
        c.put("a".to_string(), response("actualizada"));

        assert_eq!(c.len(), 2);
        assert_eq!(c.get("a").unwrap().response, "actualizada");
        assert!(c.get("b").is_some());
    }

    #[test]
    fn explicit_evict_removes_the_entry() {
        let c = cache(10);
        c.put("a".to_string(), response("1"));
        c.evict("a");
        assert!(c.get("a").is_none());
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let c = cache(0);
        c.put("a".to_string(), response("1"));
        assert!(c.get("a").is_none());
    }
}
