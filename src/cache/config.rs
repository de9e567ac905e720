//! Query cache sizing and freshness.

use std::num::NonZeroUsize;
use std::time::Duration;

const DEFAULT_POST_LIST_LIMIT: usize = 50;
const DEFAULT_COMMENT_LIST_LIMIT: usize = 100;
const DEFAULT_USER_LIMIT: usize = 500;
const DEFAULT_LIST_STALE: Duration = Duration::from_secs(60);
const DEFAULT_USER_STALE: Duration = Duration::from_secs(300);
const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum post list pages kept (LRU).
    pub post_list_limit: usize,
    /// Maximum per-post comment lists kept (LRU).
    pub comment_list_limit: usize,
    /// Maximum user lists and user details kept (LRU, each).
    pub user_limit: usize,
    /// Age after which a post list or comment list is refetched.
    pub list_stale: Duration,
    /// Age after which user lookups and the tag list are refetched.
    pub user_stale: Duration,
    /// Buffered cache events per subscriber before it lags.
    pub event_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            post_list_limit: DEFAULT_POST_LIST_LIMIT,
            comment_list_limit: DEFAULT_COMMENT_LIST_LIMIT,
            user_limit: DEFAULT_USER_LIMIT,
            list_stale: DEFAULT_LIST_STALE,
            user_stale: DEFAULT_USER_STALE,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            post_list_limit: settings.post_list_limit,
            comment_list_limit: settings.comment_list_limit,
            user_limit: settings.user_limit,
            list_stale: settings.list_stale,
            user_stale: settings.user_stale,
            event_capacity: settings.event_capacity,
        }
    }
}

impl CacheConfig {
    pub fn post_list_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.post_list_limit).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn comment_list_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.comment_list_limit).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn user_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.user_limit).unwrap_or(NonZeroUsize::MIN)
    }

    /// `tokio::sync::broadcast` panics on a zero capacity.
    pub fn event_capacity_non_zero(&self) -> usize {
        self.event_capacity.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert_eq!(config.post_list_limit, 50);
        assert_eq!(config.comment_list_limit, 100);
        assert_eq!(config.user_limit, 500);
        assert_eq!(config.list_stale, Duration::from_secs(60));
        assert_eq!(config.user_stale, Duration::from_secs(300));
    }

    #[test]
    fn non_zero_clamps_to_min() {
        let config = CacheConfig {
            post_list_limit: 0,
            event_capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.post_list_limit_non_zero().get(), 1);
        assert_eq!(config.event_capacity_non_zero(), 1);
    }
}
