use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a cache entry: the content it was computed from and the
/// requested maximum summary length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub content_id: String,
    pub max_length: usize,
}

impl CacheKey {
    pub fn new(content_id: impl Into<String>, max_length: usize) -> Self {
        Self {
            content_id: content_id.into(),
            max_length,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.content_id, self.max_length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStatus {
    Allowed,
    Blocked,
    Error,
}

impl fmt::Display for SummaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            SummaryStatus::Allowed => "allowed",
            SummaryStatus::Blocked => "blocked",
            SummaryStatus::Error => "error",
        };
        f.write_str(status)
    }
}

/// What the pipeline hands back to its caller, and what the cache stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub status: SummaryStatus,
}

impl SummaryResult {
    pub fn allowed(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            status: SummaryStatus::Allowed,
        }
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            summary: reason.into(),
            status: SummaryStatus::Blocked,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            summary: message.into(),
            status: SummaryStatus::Error,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.status == SummaryStatus::Allowed
    }
}
