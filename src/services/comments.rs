use postdash_api_types::{
    Comment, CommentId, CommentsResponse, CreateCommentRequest, LikeCommentRequest, PostId,
    UpdateCommentRequest,
};
use serde_json::Value;

use crate::infra::http::{ApiClient, ApiError};

/// `GET /comments/post/:postId`
pub async fn for_post(api: &ApiClient, post_id: PostId) -> Result<CommentsResponse, ApiError> {
    let post_id = post_id.to_string();
    api.get(&["comments", "post", post_id.as_str()], &[]).await
}

/// `POST /comments/add`
pub async fn create(api: &ApiClient, request: &CreateCommentRequest) -> Result<Comment, ApiError> {
    api.post(&["comments", "add"], request).await
}

/// `PUT /comments/:id`
pub async fn update(
    api: &ApiClient,
    id: CommentId,
    request: &UpdateCommentRequest,
) -> Result<Comment, ApiError> {
    let id = id.to_string();
    api.put(&["comments", id.as_str()], request).await
}

/// `PATCH /comments/:id`; the cache already holds the new count, so the
/// echoed comment is not decoded.
pub async fn like(
    api: &ApiClient,
    id: CommentId,
    request: LikeCommentRequest,
) -> Result<(), ApiError> {
    let id = id.to_string();
    let _: Value = api.patch(&["comments", id.as_str()], &request).await?;
    Ok(())
}

/// `DELETE /comments/:id`
pub async fn delete(api: &ApiClient, id: CommentId) -> Result<(), ApiError> {
    let id = id.to_string();
    api.delete(&["comments", id.as_str()]).await
}
