//! Cache domain - result caching keyed by location

mod key;
mod repository;

pub use key::{CachePolicy, KeyStrategy};
pub use repository::{CachedColleges, LocationCache};
