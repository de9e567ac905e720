use postdash_api_types::{CreatePostRequest, Post, PostId, PostsResponse, UpdatePostRequest};

use crate::cache::{PostListKey, SortKey};
use crate::infra::http::{ApiClient, ApiError};

/// `GET /posts?limit&skip[&sortBy&order]`
pub async fn list(
    api: &ApiClient,
    limit: u32,
    skip: u32,
    sort: Option<SortKey>,
) -> Result<PostsResponse, ApiError> {
    let mut query = vec![("limit", limit.to_string()), ("skip", skip.to_string())];
    if let Some(sort) = sort {
        query.push(("sortBy", sort.by.to_string()));
        query.push(("order", sort.order.to_string()));
    }
    api.get(&["posts"], &query).await
}

/// `GET /posts/search?q&limit&skip`
pub async fn search(
    api: &ApiClient,
    q: &str,
    limit: u32,
    skip: u32,
) -> Result<PostsResponse, ApiError> {
    let query = [
        ("q", q.to_string()),
        ("limit", limit.to_string()),
        ("skip", skip.to_string()),
    ];
    api.get(&["posts", "search"], &query).await
}

/// `GET /posts/tag/:tag?limit&skip`
pub async fn by_tag(
    api: &ApiClient,
    tag: &str,
    limit: u32,
    skip: u32,
) -> Result<PostsResponse, ApiError> {
    let query = [("limit", limit.to_string()), ("skip", skip.to_string())];
    api.get(&["posts", "tag", tag], &query).await
}

/// Issue exactly the request a list key stands for.
pub async fn fetch_list(api: &ApiClient, key: &PostListKey) -> Result<PostsResponse, ApiError> {
    match key {
        PostListKey::ByTag { tag, limit, skip } => by_tag(api, tag, *limit, *skip).await,
        PostListKey::Search { q, limit, skip } => search(api, q, *limit, *skip).await,
        PostListKey::Page { limit, skip, sort } => list(api, *limit, *skip, *sort).await,
    }
}

/// `POST /posts/add`
pub async fn create(api: &ApiClient, request: &CreatePostRequest) -> Result<Post, ApiError> {
    api.post(&["posts", "add"], request).await
}

/// `PUT /posts/:id`
pub async fn update(
    api: &ApiClient,
    id: PostId,
    request: &UpdatePostRequest,
) -> Result<Post, ApiError> {
    let id = id.to_string();
    api.put(&["posts", id.as_str()], request).await
}

/// `DELETE /posts/:id`
pub async fn delete(api: &ApiClient, id: PostId) -> Result<(), ApiError> {
    let id = id.to_string();
    api.delete(&["posts", id.as_str()]).await
}
