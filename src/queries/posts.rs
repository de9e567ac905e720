use metrics::counter;
use postdash_api_types::{Post, PostId};
use tracing::{debug, error, warn};

use super::{QueryClient, QueryError, record_fetch, record_hit};
use crate::cache::{PostIdPage, QueryKey};
use crate::filter::PostListFilter;
use crate::infra::telemetry::QUERY_SUPERSEDED_TOTAL;
use crate::services;

impl QueryClient {
    /// Load the id page for `filter`.
    ///
    /// At most one request is made, chosen by tag, then search, then the
    /// paginated listing. Every returned post is written to its detail entry
    /// before the list entry is stored and before this returns. A response
    /// that lost the race to a newer load is dropped without touching the
    /// cache.
    pub async fn post_list(&self, filter: &PostListFilter) -> Result<PostIdPage, QueryError> {
        let key = filter.list_key();
        let ticket = self.next_ticket();

        if let Some(entry) = self.cache.post_list(&key)
            && entry.is_fresh(self.cache.config().list_stale)
        {
            record_hit("post_list");
            debug!(key = %key, "post list served from cache");
            return Ok(entry.value);
        }

        record_fetch("post_list");
        let response = services::posts::fetch_list(&self.api, &key)
            .await
            .inspect_err(|err| {
                error!(query = "post_list", key = %key, error = %err, "failed to load posts");
            })?;

        if !self.is_latest(ticket) {
            counter!(QUERY_SUPERSEDED_TOTAL).increment(1);
            warn!(key = %key, ticket, "discarding superseded post list response");
            return Err(QueryError::Superseded {
                key: QueryKey::PostList(key),
            });
        }

        debug!(key = %key, count = response.posts.len(), total = response.total, "post list fetched");
        Ok(self
            .cache
            .put_post_page(key, response.posts, response.total))
    }

    /// Read a post from its detail entry. There is no single-post endpoint,
    /// so a miss is an error rather than a fetch.
    pub fn post_detail(&self, id: PostId) -> Result<Post, QueryError> {
        self.cache.post(id).ok_or_else(|| {
            error!(query = "post_detail", post_id = id, "post is not cached");
            QueryError::NotCached(id)
        })
    }

    /// Resolve an id page into posts, skipping ids whose detail entry was
    /// removed since the page was read.
    pub fn resolve_posts(&self, page: &PostIdPage) -> Vec<Post> {
        page.ids
            .iter()
            .filter_map(|id| self.cache.post(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use httpmock::MockServer;
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::cache::{CacheConfig, QueryCache, QueryScope};
    use crate::infra::http::{API_BASE_PATH, ApiClient};

    fn client(server: &MockServer) -> QueryClient {
        let base = Url::parse(&server.url(API_BASE_PATH)).expect("base url");
        let api = ApiClient::new(base, Duration::from_secs(5)).expect("api client");
        QueryClient::new(api, Arc::new(QueryCache::new(CacheConfig::default())))
    }

    fn posts_body() -> serde_json::Value {
        json!({
            "posts": [
                {"id": 1, "title": "First", "body": "one", "userId": 1, "tags": ["test", "example"]},
                {"id": 2, "title": "Second", "body": "two", "userId": 2, "tags": ["test"]}
            ],
            "total": 2, "skip": 0, "limit": 10
        })
    }

    #[tokio::test]
    async fn fresh_list_is_served_without_a_second_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/api/posts")
                .query_param("limit", "10")
                .query_param("skip", "0");
            then.status(200).json_body(posts_body());
        });

        let queries = client(&server);
        let filter = PostListFilter::default();
        let first = queries.post_list(&filter).await.expect("first load");
        let second = queries.post_list(&filter).await.expect("second load");

        assert_eq!(first, second);
        assert_eq!(first.ids, vec![1, 2]);
        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn invalidated_list_is_refetched() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/api/posts");
            then.status(200).json_body(posts_body());
        });

        let queries = client(&server);
        let filter = PostListFilter::default();
        queries.post_list(&filter).await.expect("first load");
        queries.invalidate(QueryScope::PostLists);
        queries.post_list(&filter).await.expect("reload");

        mock.assert_calls(2);
    }

    #[tokio::test]
    async fn detail_reads_never_hit_the_network() {
        let server = MockServer::start();
        let queries = client(&server);

        let err = queries.post_detail(1).expect_err("empty cache");
        assert!(matches!(err, QueryError::NotCached(1)));
    }

    #[tokio::test]
    async fn superseded_response_is_discarded() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/api/posts/search");
            then.status(200)
                .delay(Duration::from_millis(300))
                .json_body(posts_body());
        });
        server.mock(|when, then| {
            when.method("GET").path("/api/posts/tag/test");
            then.status(200).json_body(json!({
                "posts": [{"id": 2, "title": "Second", "body": "two", "userId": 2, "tags": ["test"]}],
                "total": 1
            }));
        });

        let queries = client(&server);
        let slow = PostListFilter {
            search: "first".to_string(),
            ..PostListFilter::default()
        };
        let fast = PostListFilter {
            tag: "test".to_string(),
            ..PostListFilter::default()
        };

        let (stale, latest) = tokio::join!(queries.post_list(&slow), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            queries.post_list(&fast).await
        });

        assert!(matches!(stale, Err(QueryError::Superseded { .. })));
        assert_eq!(latest.expect("latest").ids, vec![2]);
        assert!(queries.cache().post_list(&slow.list_key()).is_none());
        assert!(queries.cache().post(1).is_none());
    }

    #[tokio::test]
    async fn cache_hit_supersedes_a_slower_fetch() {
        let server = MockServer::start();
        let slow_mock = server.mock(|when, then| {
            when.method("GET").path("/api/posts/tag/slow");
            then.status(200)
                .delay(Duration::from_millis(300))
                .json_body(posts_body());
        });
        let cached_mock = server.mock(|when, then| {
            when.method("GET").path("/api/posts/tag/cached");
            then.status(200).json_body(json!({
                "posts": [{"id": 7, "title": "Seventh", "body": "seven", "userId": 1, "tags": ["cached"]}],
                "total": 1
            }));
        });

        let queries = client(&server);
        let slow = PostListFilter {
            tag: "slow".to_string(),
            ..PostListFilter::default()
        };
        let cached = PostListFilter {
            tag: "cached".to_string(),
            ..PostListFilter::default()
        };
        queries.post_list(&cached).await.expect("warm cache");

        let (stale, hit) = tokio::join!(queries.post_list(&slow), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            queries.post_list(&cached).await
        });

        assert!(matches!(stale, Err(QueryError::Superseded { .. })));
        assert_eq!(hit.expect("cache hit").ids, vec![7]);
        slow_mock.assert_calls(1);
        cached_mock.assert_calls(1);
        assert!(queries.cache().post_list(&slow.list_key()).is_none());
        assert!(queries.cache().post(1).is_none());
        assert!(queries.cache().post(2).is_none());
    }
}
