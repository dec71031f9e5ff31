//! Location cache trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::college::College;

/// Colleges cached for a location, with the age of the entry
#[derive(Debug, Clone, PartialEq)]
pub struct CachedColleges {
    pub colleges: Vec<College>,
    pub age: Duration,
}

/// Cache of search results keyed by location.
///
/// Stale entries are never purged eagerly; a read simply treats them as a miss and the next
/// write replaces them.
#[async_trait]
pub trait LocationCache: Send + Sync + Debug {
    /// Returns the fresh entry for `location`, if any
    async fn get(&self, location: &str) -> Option<CachedColleges>;

    /// Stores `colleges` for `location`, stamped with the current time
    async fn insert(&self, location: &str, colleges: Vec<College>);

    async fn contains(&self, location: &str) -> bool {
        self.get(location).await.is_some()
    }

    /// Number of stored entries, fresh or stale
    async fn len(&self) -> usize;
}
