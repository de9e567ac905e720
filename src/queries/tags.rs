use postdash_api_types::Tag;
use tracing::error;

use super::{QueryClient, QueryError, record_fetch, record_hit};
use crate::services;

impl QueryClient {
    pub async fn tags(&self) -> Result<Vec<Tag>, QueryError> {
        if let Some(entry) = self.cache.tags()
            && entry.is_fresh(self.cache.config().user_stale)
        {
            record_hit("tags");
            return Ok(entry.value);
        }

        record_fetch("tags");
        let tags = services::tags::list(&self.api).await.inspect_err(|err| {
            error!(query = "tags", error = %err, "failed to load tags");
        })?;

        self.cache.put_tags(tags.clone());
        Ok(tags)
    }
}
