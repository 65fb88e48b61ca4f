//! Tiered freshness cache.
//!
//! One last-known-good raw document per logical key. A lookup either serves
//! the cached copy (fresh enough under its policy), refetches and overwrites,
//! or — when the refetch fails but a prior copy exists — serves the stale
//! copy instead of surfacing the failure. Entries are never proactively
//! deleted: TTL governs usability, not existence.
//!
//! Concurrent requests for the same expired key may both refetch and both
//! overwrite; writes are whole-document replacements of the same upstream
//! truth, so the last writer wins harmlessly.

pub mod key;
pub mod policy;
pub mod store;

pub use key::CacheKey;
pub use policy::{FixedTtl, LiveAwareTtl, TtlPolicy};
pub use store::{DocumentStore, FileStore};

use log::{debug, warn};
use mlb_api::client::ApiResult;
use std::time::Duration;

/// A served document plus whether it was past its TTL when served.
#[derive(Debug, Clone)]
pub struct CachedDocument {
    pub body: String,
    pub was_stale: bool,
}

pub struct TieredCache<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> TieredCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Serve the document for `key`, refetching when the cached copy is
    /// missing or too old under `policy`.
    ///
    /// Fails only on a cold miss with a failing refetch; every other path
    /// yields a document.
    pub async fn fetch<F, Fut>(
        &self,
        key: &CacheKey,
        policy: &dyn TtlPolicy,
        refetch: F,
    ) -> ApiResult<CachedDocument>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<String>>,
    {
        let Some(body) = self.store.load(key) else {
            debug!("cache miss for {key}, fetching");
            let body = refetch().await?;
            self.write_entry(key, &body);
            return Ok(CachedDocument {
                body,
                was_stale: false,
            });
        };

        let age = self.store.age(key).unwrap_or(Duration::MAX);
        let ttl = policy.effective_ttl(&body);
        if age <= ttl {
            return Ok(CachedDocument {
                body,
                was_stale: false,
            });
        }

        debug!("cache entry {key} expired ({age:?} > {ttl:?}), refreshing");
        match refetch().await {
            Ok(fresh) => {
                self.write_entry(key, &fresh);
                Ok(CachedDocument {
                    body: fresh,
                    was_stale: false,
                })
            }
            Err(e) => {
                warn!("refresh failed for {key}, serving stale copy: {e}");
                Ok(CachedDocument {
                    body,
                    was_stale: true,
                })
            }
        }
    }

    /// A failed write must not fail the request; the fetched document is
    /// still valid for the response.
    fn write_entry(&self, key: &CacheKey, body: &str) {
        if let Err(e) = self.store.store(key, body) {
            warn!("failed to persist cache entry {key}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::store::MemoryStore;
    use super::*;
    use mlb_api::client::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FEED_KEY: CacheKey = CacheKey::GameFeed { game_pk: 1 };

    fn unavailable() -> ApiError {
        ApiError::Status(503, "http://test/doc".into())
    }

    #[tokio::test]
    async fn cold_miss_fetches_and_stores() {
        let cache = TieredCache::new(MemoryStore::new());
        let doc = cache
            .fetch(&FEED_KEY, &FixedTtl(Duration::from_secs(60)), || async {
                Ok(r#"{"fresh":true}"#.to_owned())
            })
            .await
            .expect("cold fetch succeeds");

        assert!(!doc.was_stale);
        assert_eq!(doc.body, r#"{"fresh":true}"#);
    }

    #[tokio::test]
    async fn cold_miss_with_failing_upstream_is_an_error() {
        let cache = TieredCache::new(MemoryStore::new());
        let result = cache
            .fetch(&FEED_KEY, &FixedTtl(Duration::from_secs(60)), || async {
                Err(unavailable())
            })
            .await;
        assert!(matches!(result, Err(ApiError::Status(503, _))));
    }

    #[tokio::test]
    async fn fresh_entry_is_served_without_refetching() {
        let store = MemoryStore::new();
        store.put_aged(&FEED_KEY, r#"{"cached":1}"#, Duration::from_secs(10));
        let cache = TieredCache::new(store);

        let calls = AtomicUsize::new(0);
        let doc = cache
            .fetch(&FEED_KEY, &FixedTtl(Duration::from_secs(60)), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(String::new()) }
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0, "refetch must not run");
        assert!(!doc.was_stale);
        assert_eq!(doc.body, r#"{"cached":1}"#);
    }

    #[tokio::test]
    async fn expired_entry_is_refetched_and_overwritten() {
        let store = MemoryStore::new();
        store.put_aged(&FEED_KEY, r#"{"cached":1}"#, Duration::from_secs(120));
        let cache = TieredCache::new(store);

        let doc = cache
            .fetch(&FEED_KEY, &FixedTtl(Duration::from_secs(60)), || async {
                Ok(r#"{"cached":2}"#.to_owned())
            })
            .await
            .unwrap();
        assert!(!doc.was_stale);
        assert_eq!(doc.body, r#"{"cached":2}"#);

        // The overwrite reset the age; the next read needs no refetch.
        let doc = cache
            .fetch(&FEED_KEY, &FixedTtl(Duration::from_secs(60)), || async {
                Err(unavailable())
            })
            .await
            .unwrap();
        assert!(!doc.was_stale);
        assert_eq!(doc.body, r#"{"cached":2}"#);
    }

    #[tokio::test]
    async fn expired_entry_survives_upstream_failure_as_stale() {
        let store = MemoryStore::new();
        store.put_aged(&FEED_KEY, r#"{"cached":1}"#, Duration::from_secs(120));
        let cache = TieredCache::new(store);

        let doc = cache
            .fetch(&FEED_KEY, &FixedTtl(Duration::from_secs(60)), || async {
                Err(unavailable())
            })
            .await
            .expect("stale copy is still served");
        assert!(doc.was_stale);
        assert_eq!(doc.body, r#"{"cached":1}"#);
    }

    #[tokio::test]
    async fn live_schedule_expires_faster_than_idle_schedule() {
        let live_doc = r#"{"dates":[{"games":[{"status":{"abstractGameState":"Live"}}]}]}"#;
        let idle_doc = r#"{"dates":[{"games":[{"status":{"abstractGameState":"Final"}}]}]}"#;
        let age = Duration::from_secs(120); // between LIVE_TTL and SCHEDULE_TTL

        for (raw, expect_refetch) in [(live_doc, true), (idle_doc, false)] {
            let store = MemoryStore::new();
            store.put_aged(&FEED_KEY, raw, age);
            let cache = TieredCache::new(store);

            let calls = AtomicUsize::new(0);
            let doc = cache
                .fetch(&FEED_KEY, &LiveAwareTtl::default(), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(r#"{"refetched":true}"#.to_owned()) }
                })
                .await
                .unwrap();

            assert_eq!(calls.load(Ordering::SeqCst) == 1, expect_refetch);
            assert_eq!(doc.body.contains("refetched"), expect_refetch);
        }
    }
}
