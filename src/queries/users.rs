use postdash_api_types::{User, UserId, UserListQuery};
use tracing::error;

use super::{QueryClient, QueryError, record_fetch, record_hit};
use crate::services;

impl QueryClient {
    pub async fn users(&self, query: &UserListQuery) -> Result<Vec<User>, QueryError> {
        if let Some(entry) = self.cache.user_list(query)
            && entry.is_fresh(self.cache.config().user_stale)
        {
            record_hit("users");
            return Ok(entry.value);
        }

        record_fetch("users");
        let response = services::users::list(&self.api, query)
            .await
            .inspect_err(|err| {
                error!(query = "users", error = %err, "failed to load users");
            })?;

        self.cache.put_user_list(query.clone(), response.users.clone());
        Ok(response.users)
    }

    /// Usernames and avatars of every user, for decorating post rows.
    pub async fn authors(&self) -> Result<Vec<User>, QueryError> {
        self.users(&UserListQuery::authors()).await
    }

    pub async fn user_detail(&self, id: UserId) -> Result<User, QueryError> {
        if let Some(entry) = self.cache.user(id)
            && entry.is_fresh(self.cache.config().user_stale)
        {
            record_hit("user_detail");
            return Ok(entry.value);
        }

        record_fetch("user_detail");
        let user = services::users::get(&self.api, id)
            .await
            .inspect_err(|err| {
                error!(query = "user_detail", user_id = id, error = %err, "failed to load user");
            })?;

        self.cache.put_user(user.clone());
        Ok(user)
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
    use crate::cache::QueryCache;
    use crate::infra::http::{API_BASE_PATH, ApiClient};

    fn client(server: &MockServer) -> QueryClient {
        let base = Url::parse(&server.url(API_BASE_PATH)).expect("base url");
        let api = ApiClient::new(base, Duration::from_secs(5)).expect("api client");
        QueryClient::new(api, Arc::new(QueryCache::default()))
    }

    #[tokio::test]
    async fn author_lookup_selects_username_and_image() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/api/users")
                .query_param("limit", "0")
                .query_param("select", "username,image");
            then.status(200).json_body(json!({
                "users": [{"id": 1, "username": "emilys", "image": "https://img/1.png"}],
                "total": 1
            }));
        });

        let queries = client(&server);
        let authors = queries.authors().await.expect("authors");
        assert_eq!(authors[0].username, "emilys");
        queries.authors().await.expect("cached authors");
        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn user_detail_failure_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/api/users/99");
            then.status(404).body("not found");
        });

        let err = client(&server).user_detail(99).await.expect_err("missing user");
        assert!(matches!(err, QueryError::Api(_)));
    }
}
