use postdash_api_types::{Comment, PostId};
use tracing::{debug, error};

use super::{QueryClient, QueryError, record_fetch, record_hit};
use crate::services;

impl QueryClient {
    /// All comments of one post; comment lists are never paginated.
    pub async fn comments(&self, post_id: PostId) -> Result<Vec<Comment>, QueryError> {
        if let Some(entry) = self.cache.comments(post_id)
            && entry.is_fresh(self.cache.config().list_stale)
        {
            record_hit("comments");
            return Ok(entry.value);
        }

        record_fetch("comments");
        let response = services::comments::for_post(&self.api, post_id)
            .await
            .inspect_err(|err| {
                error!(query = "comments", post_id, error = %err, "failed to load comments");
            })?;
        debug!(post_id, count = response.comments.len(), "comments fetched");

        self.cache.put_comments(post_id, response.comments.clone());
        Ok(response.comments)
    }
}
