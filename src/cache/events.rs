//! Cache change notifications.
//!
//! Every write to the query cache is published on a broadcast channel so
//! views can re-render the entries they display.

use postdash_api_types::PostId;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;

use super::keys::QueryKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The entry was written or patched.
    Updated,
    /// The entry no longer exists.
    Removed,
    /// The entry is kept but will be refetched on next use.
    Invalidated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEvent {
    pub key: QueryKey,
    pub kind: EventKind,
}

impl CacheEvent {
    pub fn new(key: QueryKey, kind: EventKind) -> Self {
        Self { key, kind }
    }
}

/// Follows a single post detail entry.
pub struct PostWatch {
    id: PostId,
    rx: broadcast::Receiver<CacheEvent>,
}

impl PostWatch {
    pub(crate) fn new(id: PostId, rx: broadcast::Receiver<CacheEvent>) -> Self {
        Self { id, rx }
    }

    pub fn post_id(&self) -> PostId {
        self.id
    }

    /// Wait for the next change to the watched post.
    ///
    /// A lagged receiver reports `Invalidated` since intermediate changes were
    /// dropped. Returns `None` once the cache is gone.
    pub async fn changed(&mut self) -> Option<EventKind> {
        let key = QueryKey::PostDetail(self.id);
        loop {
            match self.rx.recv().await {
                Ok(event) if event.key == key => return Some(event.kind),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    debug!(post_id = self.id, skipped, "post watch lagged");
                    return Some(EventKind::Invalidated);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
