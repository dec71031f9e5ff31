//! Cache key strategies and per-cache policy

use std::time::Duration;

/// How a location string is turned into a cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Lower-cased and trimmed, so "Mumbai " and "mumbai" share an entry
    Normalized,
    /// The raw string as typed or picked
    Exact,
}

impl KeyStrategy {
    pub fn key(&self, location: &str) -> String {
        match self {
            KeyStrategy::Normalized => location.trim().to_lowercase(),
            KeyStrategy::Exact => location.to_string(),
        }
    }
}

/// Key strategy plus optional time-to-live of a location cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    pub key_strategy: KeyStrategy,
    /// `None` keeps entries for the whole session
    pub ttl: Option<Duration>,
}

impl CachePolicy {
    /// Normalized keys with a freshness window, as used by the query pipeline
    pub fn pipeline(ttl: Duration) -> Self {
        Self {
            key_strategy: KeyStrategy::Normalized,
            ttl: Some(ttl),
        }
    }

    /// Exact keys, never stale, as used for speculative pre-fetch results
    pub fn speculative() -> Self {
        Self {
            key_strategy: KeyStrategy::Exact,
            ttl: None,
        }
    }

    /// Whether an entry of the given age may still be served
    pub fn is_fresh(&self, age: Duration) -> bool {
        self.ttl.is_none_or(|ttl| age < ttl)
    }
}
