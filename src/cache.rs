//! # Persisted-Query Cache
//!
//! In-memory cache mapping persisted-query hashes to parsed query
//! documents, backing the automatic persisted queries (APQ) extension.
//!
//! All operations are synchronous (the RwLock is `parking_lot`, not
//! `tokio::sync`) because the lock is never held across an `.await`
//! point. Expiry is enforced lazily on read: an entry older than the
//! configured TTL is treated as absent and evicted, so the cache does
//! not grow without bound across query churn.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_graphql::extensions::apollo_persisted_queries::CacheStorage;
use async_graphql::parser::types::ExecutableDocument;
use parking_lot::RwLock;

#[derive(Debug, Clone)]
struct CacheEntry {
    document: ExecutableDocument,
    inserted_at: Instant,
}

/// Thread-safe, cloneable persisted-query cache with check-on-read TTL.
#[derive(Debug, Clone)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl QueryCache {
    /// Create an empty cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Insert or overwrite an entry, refreshing its insertion instant.
    pub fn insert(&self, key: String, document: ExecutableDocument) {
        self.entries.write().insert(
            key,
            CacheEntry {
                document,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Look up an entry, evicting it if it has outlived the TTL.
    pub fn get(&self, key: &str) -> Option<ExecutableDocument> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                    return Some(entry.document.clone());
                }
                Some(_) => {}
            }
        }

        // Expired under the read lock. Re-check after the lock upgrade:
        // a concurrent insert may have refreshed the entry in between.
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                Some(entry.document.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Number of stored entries, including any not yet evicted by a read.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Storage backend for the APQ extension: hash in, parsed document out.
#[async_trait::async_trait]
impl CacheStorage for QueryCache {
    async fn get(&self, key: String) -> Option<ExecutableDocument> {
        QueryCache::get(self, &key)
    }

    async fn set(&self, key: String, query: ExecutableDocument) {
        self.insert(key, query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::parser::parse_query;
    use async_graphql::parser::types::Selection;

    const TTL: Duration = Duration::from_secs(3600);

    fn doc(query: &str) -> ExecutableDocument {
        parse_query(query).expect("test query must parse")
    }

    /// Name of the first selected field, to tell stored documents apart.
    fn first_field_name(document: &ExecutableDocument) -> String {
        let (_, operation) = document
            .operations
            .iter()
            .next()
            .expect("document has an operation");
        match &operation.node.selection_set.node.items[0].node {
            Selection::Field(field) => field.node.name.node.to_string(),
            other => panic!("expected a field selection, got {other:?}"),
        }
    }

    #[test]
    fn insert_then_get_round_trips() {
        let cache = QueryCache::new(TTL);
        cache.insert("hash-1".to_string(), doc("{ ping }"));

        // Every subsequent read within the TTL sees the entry.
        for _ in 0..3 {
            let stored = cache.get("hash-1").expect("entry within TTL");
            assert_eq!(first_field_name(&stored), "ping");
        }
    }

    #[test]
    fn get_missing_key_returns_none() {
        let cache = QueryCache::new(TTL);
        assert!(cache.get("nope").is_none());
    }

    #[test]
    fn insert_overwrites_unconditionally() {
        let cache = QueryCache::new(TTL);
        cache.insert("hash-1".to_string(), doc("{ ping }"));
        cache.insert("hash-1".to_string(), doc("{ version { number } }"));

        let stored = cache.get("hash-1").expect("entry within TTL");
        assert_eq!(first_field_name(&stored), "version");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expired_entry_is_reported_absent_and_evicted() {
        let cache = QueryCache::new(Duration::ZERO);
        cache.insert("hash-1".to_string(), doc("{ ping }"));
        assert_eq!(cache.len(), 1);

        assert!(cache.get("hash-1").is_none());
        assert_eq!(cache.len(), 0, "expired entry must be evicted on read");
    }

    #[test]
    fn reinsert_refreshes_expiry() {
        let cache = QueryCache::new(Duration::from_millis(50));
        cache.insert("hash-1".to_string(), doc("{ ping }"));
        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.get("hash-1").is_none());

        cache.insert("hash-1".to_string(), doc("{ ping }"));
        assert!(cache.get("hash-1").is_some());
    }

    #[test]
    fn concurrent_readers_and_writers() {
        let cache = QueryCache::new(TTL);
        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                let key = format!("hash-{i}");
                cache.insert(key.clone(), doc(&format!("{{ field{i} }}")));
                let stored = cache.get(&key).expect("entry within TTL");
                assert_eq!(first_field_name(&stored), format!("field{i}"));
            }));
        }
        for handle in handles {
            handle.join().expect("cache worker panicked");
        }
        assert_eq!(cache.len(), 8);
    }

    #[tokio::test]
    async fn cache_storage_trait_round_trips() {
        let cache = QueryCache::new(TTL);
        CacheStorage::set(&cache, "hash-1".to_string(), doc("{ ping }")).await;

        let stored = CacheStorage::get(&cache, "hash-1".to_string())
            .await
            .expect("entry within TTL");
        assert_eq!(first_field_name(&stored), "ping");
        assert!(CacheStorage::get(&cache, "hash-2".to_string()).await.is_none());
    }
}
