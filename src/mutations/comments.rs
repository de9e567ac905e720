use std::sync::Arc;

use postdash_api_types::{Comment, CommentId, LikeCommentRequest, PostId};
use tracing::{debug, info};

use super::{MutationError, MutationKind, Mutations, failed, started};
use crate::cache::QueryCache;
use crate::forms::{EditCommentForm, NewCommentForm};
use crate::infra::http::ApiClient;
use crate::services;

impl Mutations {
    /// Add a comment and append it to its post's list.
    pub async fn create_comment(&self, form: &NewCommentForm) -> Result<Comment, MutationError> {
        let kind = MutationKind::CreateComment;
        started(kind);
        let request = form.validate().map_err(|err| failed(kind, err))?;

        let mut comment = services::comments::create(&self.api, &request)
            .await
            .map_err(|err| failed(kind, err))?;
        comment.post_id = form.post_id;

        self.cache.append_comment(comment.clone());
        info!(mutation = kind.label(), post_id = form.post_id, comment_id = comment.id, "comment created");
        Ok(comment)
    }

    /// Replace a comment in its post's list. The cached like count wins over
    /// whatever the server echoes.
    pub async fn update_comment(&self, form: &EditCommentForm) -> Result<Comment, MutationError> {
        let kind = MutationKind::UpdateComment;
        started(kind);
        let request = form.validate().map_err(|err| failed(kind, err))?;

        let mut updated = services::comments::update(&self.api, form.comment_id, &request)
            .await
            .map_err(|err| failed(kind, err))?;
        updated.post_id = form.post_id;

        let replacement = updated.clone();
        let patched = self.cache.patch_comments(form.post_id, move |comments| {
            comments
                .iter_mut()
                .find(|comment| comment.id == replacement.id)
                .map(|slot| {
                    let likes = slot.likes;
                    *slot = Comment {
                        likes,
                        ..replacement
                    };
                    slot.clone()
                })
        });
        if let Some(Some(comment)) = patched {
            updated = comment;
        }

        info!(mutation = kind.label(), post_id = form.post_id, comment_id = form.comment_id, "comment updated");
        Ok(updated)
    }

    /// Delete a comment and remove it from its post's list.
    pub async fn delete_comment(
        &self,
        comment_id: CommentId,
        post_id: PostId,
    ) -> Result<(), MutationError> {
        let kind = MutationKind::DeleteComment;
        started(kind);

        services::comments::delete(&self.api, comment_id)
            .await
            .map_err(|err| failed(kind, err))?;

        self.cache.patch_comments(post_id, |comments| {
            comments.retain(|comment| comment.id != comment_id);
        });
        info!(mutation = kind.label(), post_id, comment_id, "comment deleted");
        Ok(())
    }

    /// Bump the like count in the cache right away. Nothing is sent until
    /// [`PendingLike::send`].
    pub fn begin_like_comment(&self, comment: &Comment) -> PendingLike {
        started(MutationKind::LikeComment);
        let comment_id = comment.id;
        let post_id = comment.post_id;

        let previous = self
            .cache
            .patch_comments(post_id, |comments| {
                comments
                    .iter_mut()
                    .find(|cached| cached.id == comment_id)
                    .map(|cached| {
                        let previous = cached.likes;
                        cached.likes = previous + 1;
                        previous
                    })
            })
            .flatten()
            .unwrap_or(comment.likes);

        debug!(post_id, comment_id, likes = previous + 1, "optimistic like applied");
        PendingLike {
            api: self.api.clone(),
            cache: Arc::clone(&self.cache),
            comment_id,
            post_id,
            previous,
        }
    }

    pub async fn like_comment(&self, comment: &Comment) -> Result<u64, MutationError> {
        self.begin_like_comment(comment).send().await
    }
}

/// A like already shown in the cache, waiting for the server.
#[must_use = "the like is only sent by `send`"]
pub struct PendingLike {
    api: ApiClient,
    cache: Arc<QueryCache>,
    comment_id: CommentId,
    post_id: PostId,
    previous: u64,
}

impl PendingLike {
    /// The count the cache now shows.
    pub fn likes(&self) -> u64 {
        self.previous + 1
    }

    /// Send the new count. On failure the cached count goes back to what it
    /// was before the like, unless a later like has already moved it on.
    pub async fn send(self) -> Result<u64, MutationError> {
        let kind = MutationKind::LikeComment;
        let request = LikeCommentRequest {
            likes: self.likes(),
        };

        match services::comments::like(&self.api, self.comment_id, request).await {
            Ok(()) => {
                info!(mutation = kind.label(), comment_id = self.comment_id, likes = request.likes, "comment liked");
                Ok(request.likes)
            }
            Err(err) => {
                let (comment_id, previous) = (self.comment_id, self.previous);
                // A later like sends an absolute count that already includes
                // this one, so only the newest like is reverted.
                self.cache.patch_comments(self.post_id, |comments| {
                    if let Some(cached) = comments.iter_mut().find(|c| c.id == comment_id)
                        && cached.likes == request.likes
                    {
                        cached.likes = previous;
                    }
                });
                Err(failed(kind, err))
            }
        }
    }
}
