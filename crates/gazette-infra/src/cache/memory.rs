//! In-memory cache implementation - used as fallback when Redis is unavailable.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use gazette_core::ports::{Cache, CacheError};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn fresh(&self) -> bool {
        self.expires_at
            .map(|deadline| Instant::now() <= deadline)
            .unwrap_or(true)
    }
}

/// In-memory cache over a HashMap behind an async RwLock.
///
/// Single-process only; contents are lost on restart.
pub struct InMemoryCache {
    store: RwLock<HashMap<String, Entry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        {
            let store = self.store.read().await;
            match store.get(key) {
                Some(entry) if entry.fresh() => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop the stale entry under a write lock.
        self.store.write().await.remove(key);
        None
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl.map(|d| Instant::now() + d),
        };

        self.store.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = InMemoryCache::new();
        cache.set("post-1", "serialized", None).await.unwrap();
        assert_eq!(cache.get("post-1").await, Some("serialized".to_string()));
    }

    #[tokio::test]
    async fn delete_removes_the_entry() {
        let cache = InMemoryCache::new();
        cache.set("post-1", "serialized", None).await.unwrap();
        cache.delete("post-1").await.unwrap();
        assert_eq!(cache.get("post-1").await, None);
        assert!(!cache.exists("post-1").await);
    }

    #[tokio::test]
    async fn entries_expire_after_their_ttl() {
        let cache = InMemoryCache::new();
        cache
            .set("post-1", "serialized", Some(Duration::from_millis(10)))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("post-1").await, None);
    }
}
