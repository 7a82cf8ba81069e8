//! # SummaryCache Module
//!
//! This module provides the process-wide memo of finished summaries, keyed by the
//! identity of the summarized content and the requested summary length.
//!
//! Entries are written once, on the first successful summarization of a key, and
//! are read-only afterwards. There is no eviction and no expiry; the cache lives as
//! long as the process that owns it.

mod cache;
mod domain;

pub use cache::memory::InMemoryCache;
pub use cache::SummaryCache;
pub use domain::{CacheKey, SummaryResult, SummaryStatus};
