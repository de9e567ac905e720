//! Writes and their cache effects.
//!
//! Each mutation declares one [`CacheStrategy`]. Patching mutations edit the
//! affected entries in place once the server accepts the change (or, for a
//! like, before the request leaves); invalidating mutations mark a scope for
//! refetch. A failed mutation is logged with its label and leaves the cache
//! as it was.

use std::fmt;
use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::error;

use crate::cache::{QueryCache, QueryScope};
use crate::forms::ValidationErrors;
use crate::infra::http::{ApiClient, ApiError};
use crate::infra::telemetry::{MUTATION_FAILURE_TOTAL, MUTATION_TOTAL};
use crate::queries::QueryClient;

mod comments;
mod posts;

pub use comments::PendingLike;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStrategy {
    /// Edit the affected entries directly.
    Patch,
    /// Mark a scope stale so its next read refetches.
    Invalidate(QueryScope),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    CreatePost,
    UpdatePost,
    DeletePost,
    CreateComment,
    UpdateComment,
    DeleteComment,
    LikeComment,
}

impl MutationKind {
    pub fn strategy(self) -> CacheStrategy {
        match self {
            Self::CreatePost => CacheStrategy::Invalidate(QueryScope::PostLists),
            Self::UpdatePost
            | Self::DeletePost
            | Self::CreateComment
            | Self::UpdateComment
            | Self::DeleteComment
            | Self::LikeComment => CacheStrategy::Patch,
        }
    }

    /// Applied before the server confirms.
    pub fn is_optimistic(self) -> bool {
        matches!(self, Self::LikeComment)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CreatePost => "create_post",
            Self::UpdatePost => "update_post",
            Self::DeletePost => "delete_post",
            Self::CreateComment => "create_comment",
            Self::UpdateComment => "update_comment",
            Self::DeleteComment => "delete_comment",
            Self::LikeComment => "like_comment",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl MutationError {
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Api(_) => None,
        }
    }
}

/// Entry point for every write.
#[derive(Clone)]
pub struct Mutations {
    api: ApiClient,
    cache: Arc<QueryCache>,
}

impl Mutations {
    pub fn new(api: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Apply the scope invalidation of an invalidating mutation.
    fn settle(&self, kind: MutationKind) {
        if let CacheStrategy::Invalidate(scope) = kind.strategy() {
            self.cache.invalidate(scope);
        }
    }
}

impl From<&QueryClient> for Mutations {
    fn from(queries: &QueryClient) -> Self {
        Self::new(queries.api().clone(), Arc::clone(queries.cache()))
    }
}

fn started(kind: MutationKind) {
    counter!(MUTATION_TOTAL, "mutation" => kind.label()).increment(1);
}

fn failed(kind: MutationKind, err: impl Into<MutationError>) -> MutationError {
    let err = err.into();
    counter!(MUTATION_FAILURE_TOTAL, "mutation" => kind.label()).increment(1);
    error!(mutation = kind.label(), error = %err, "mutation failed");
    err
}
