use postdash_api_types::{Post, PostId};
use tracing::info;

use super::{MutationError, MutationKind, Mutations, failed, started};
use crate::forms::{EditPostForm, NewPostForm};
use crate::services;

impl Mutations {
    /// Create a post. The new post gets a detail entry and every cached list
    /// is marked stale, since its position in them is unknown.
    pub async fn create_post(&self, form: &NewPostForm) -> Result<Post, MutationError> {
        let kind = MutationKind::CreatePost;
        started(kind);
        let request = form.validate().map_err(|err| failed(kind, err))?;

        let post = services::posts::create(&self.api, &request)
            .await
            .map_err(|err| failed(kind, err))?;

        self.cache.put_post(post.clone());
        self.settle(kind);
        info!(mutation = kind.label(), post_id = post.id, "post created");
        Ok(post)
    }

    /// Update a post and merge the submitted fields into its detail entry.
    /// Lists hold ids only, so they need no change.
    pub async fn update_post(&self, form: &EditPostForm) -> Result<Post, MutationError> {
        let kind = MutationKind::UpdatePost;
        let id = form.post_id;
        started(kind);
        let request = form.validate().map_err(|err| failed(kind, err))?;

        let server = services::posts::update(&self.api, id, &request)
            .await
            .map_err(|err| failed(kind, err))?;

        let post = self
            .cache
            .patch_post(id, |cached| request.apply_to(cached))
            .unwrap_or(server);
        info!(mutation = kind.label(), post_id = id, "post updated");
        Ok(post)
    }

    /// Delete a post, then drop it from its detail entry and every cached
    /// list.
    pub async fn delete_post(&self, id: PostId) -> Result<(), MutationError> {
        let kind = MutationKind::DeletePost;
        started(kind);

        services::posts::delete(&self.api, id)
            .await
            .map_err(|err| failed(kind, err))?;

        self.cache.remove_post(id);
        info!(mutation = kind.label(), post_id = id, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use httpmock::MockServer;
    use postdash_api_types::UserId;
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::cache::{PostListKey, QueryCache};
    use crate::infra::http::{API_BASE_PATH, ApiClient};

    fn setup(server: &MockServer) -> Mutations {
        let base = Url::parse(&server.url(API_BASE_PATH)).expect("base url");
        let api = ApiClient::new(base, Duration::from_secs(5)).expect("api client");
        Mutations::new(api, Arc::new(QueryCache::default()))
    }

    fn post(id: PostId, user_id: UserId) -> Post {
        Post {
            id,
            title: format!("Post {id}"),
            body: "body text".to_string(),
            user_id,
            tags: None,
            reactions: None,
            views: None,
            author: None,
        }
    }

    fn page_key() -> PostListKey {
        PostListKey::Page {
            limit: 10,
            skip: 0,
            sort: None,
        }
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_server() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST").path("/api/posts/add");
            then.status(201).json_body(json!({"id": 251, "title": "t", "body": "b", "userId": 1}));
        });

        let err = setup(&server)
            .create_post(&NewPostForm::default())
            .await
            .expect_err("empty form");
        assert!(err.validation_errors().is_some());
        mock.assert_calls(0);
    }

    #[tokio::test]
    async fn create_marks_lists_stale() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/api/posts/add")
                .json_body(json!({"title": "Hello", "body": "A body long enough", "userId": 5}));
            then.status(201)
                .json_body(json!({"id": 251, "title": "Hello", "body": "A body long enough", "userId": 5}));
        });

        let mutations = setup(&server);
        mutations.cache().put_post_page(page_key(), vec![post(1, 1)], 1);

        let created = mutations
            .create_post(&NewPostForm {
                title: "Hello".to_string(),
                body: "A body long enough".to_string(),
                user_id: 5,
            })
            .await
            .expect("created");

        mock.assert();
        assert_eq!(created.id, 251);
        assert!(mutations.cache().post(251).is_some());
        assert!(mutations.cache().post_list(&page_key()).expect("kept").is_invalidated());
    }

    #[tokio::test]
    async fn update_merges_into_detail_entry() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("PUT")
                .path("/api/posts/1")
                .json_body(json!({"title": "Edited"}));
            then.status(200)
                .json_body(json!({"id": 1, "title": "Edited", "userId": 1}));
        });

        let mutations = setup(&server);
        mutations.cache().put_post_page(page_key(), vec![post(1, 1)], 1);

        let updated = mutations
            .update_post(&EditPostForm {
                post_id: 1,
                title: Some("Edited".to_string()),
                body: None,
            })
            .await
            .expect("updated");

        assert_eq!(updated.title, "Edited");
        assert_eq!(updated.body, "body text");
        assert_eq!(mutations.cache().post(1).expect("detail").title, "Edited");
        assert!(!mutations.cache().post_list(&page_key()).expect("list").is_invalidated());
    }

    #[tokio::test]
    async fn failed_delete_leaves_cache_untouched() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("DELETE").path("/api/posts/1");
            then.status(500).body("boom");
        });

        let mutations = setup(&server);
        mutations.cache().put_post_page(page_key(), vec![post(1, 1)], 1);

        let err = mutations.delete_post(1).await.expect_err("server error");
        assert!(matches!(err, MutationError::Api(_)));
        assert!(mutations.cache().post(1).is_some());
        assert_eq!(
            mutations.cache().post_list(&page_key()).expect("list").value.ids,
            vec![1]
        );
    }
}
