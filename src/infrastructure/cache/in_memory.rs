//! In-memory location cache using moka

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::cache::{CachePolicy, CachedColleges, LocationCache};
use crate::domain::college::College;

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    colleges: Vec<College>,
    stored_at: Instant,
}

/// Thread-safe in-memory cache of college lists.
///
/// The cache only grows for the lifetime of the session: moka is built without a capacity
/// bound, and freshness is checked on read against the policy's TTL.
#[derive(Debug)]
pub struct InMemoryLocationCache {
    cache: MokaCache<String, CacheEntry>,
    policy: CachePolicy,
}

impl InMemoryLocationCache {
    pub fn new(policy: CachePolicy) -> Self {
        let cache = MokaCache::builder().build();

        Self { cache, policy }
    }
}

#[async_trait]
impl LocationCache for InMemoryLocationCache {
    async fn get(&self, location: &str) -> Option<CachedColleges> {
        let key = self.policy.key_strategy.key(location);
        let entry = self.cache.get(&key).await?;
        let age = entry.stored_at.elapsed();

        if !self.policy.is_fresh(age) {
            debug!(key = %key, age_secs = age.as_secs(), "Cache entry is stale");
            return None;
        }

        Some(CachedColleges {
            colleges: entry.colleges,
            age,
        })
    }

    async fn insert(&self, location: &str, colleges: Vec<College>) {
        let key = self.policy.key_strategy.key(location);
        let entry = CacheEntry {
            colleges,
            stored_at: Instant::now(),
        };

        self.cache.insert(key, entry).await;
    }

    async fn len(&self) -> usize {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count() as usize
    }
}
