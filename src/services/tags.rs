use postdash_api_types::Tag;

use crate::infra::http::{ApiClient, ApiError};

/// `GET /posts/tags`
pub async fn list(api: &ApiClient) -> Result<Vec<Tag>, ApiError> {
    api.get(&["posts", "tags"], &[]).await
}
