//! Cached reads.
//!
//! `QueryClient` answers each read from a fresh cache entry when it can and
//! otherwise fetches, stores and returns. Post lists are normalized: posts go
//! to detail entries and the list entry keeps only ids and the total.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use metrics::counter;
use postdash_api_types::PostId;
use thiserror::Error;

use crate::cache::{QueryCache, QueryKey, QueryScope};
use crate::infra::http::{ApiClient, ApiError};
use crate::infra::telemetry::{QUERY_CACHE_HIT_TOTAL, QUERY_FETCH_TOTAL};

mod comments;
mod posts;
mod tags;
mod users;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A newer list load was started while this one was in flight; its
    /// response was discarded.
    #[error("list request for `{key}` was superseded by a newer request")]
    Superseded { key: QueryKey },
    #[error("post {0} is not cached")]
    NotCached(PostId),
}

#[derive(Clone)]
pub struct QueryClient {
    api: ApiClient,
    cache: Arc<QueryCache>,
    generation: Arc<AtomicU64>,
}

impl QueryClient {
    pub fn new(api: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self {
            api,
            cache,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Mark entries for refetch on their next read.
    pub fn invalidate(&self, scope: QueryScope) -> usize {
        self.cache.invalidate(scope)
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }
}

fn record_hit(query: &'static str) {
    counter!(QUERY_CACHE_HIT_TOTAL, "query" => query).increment(1);
}

fn record_fetch(query: &'static str) {
    counter!(QUERY_FETCH_TOTAL, "query" => query).increment(1);
}
