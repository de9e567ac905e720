use postdash_api_types::{CommentId, CreateCommentRequest, PostId, UpdateCommentRequest, UserId};

use super::validation::ValidationErrors;

/// The "add comment" dialog, opened from one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommentForm {
    pub post_id: PostId,
    pub user_id: UserId,
    pub body: String,
}

impl NewCommentForm {
    pub fn new(post_id: PostId, user_id: UserId) -> Self {
        Self {
            post_id,
            user_id,
            body: String::new(),
        }
    }

    pub fn validate(&self) -> Result<CreateCommentRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let body = self.body.trim();
        if body.is_empty() {
            errors.push("body", "is required");
        }
        errors.into_result(CreateCommentRequest {
            body: body.to_string(),
            post_id: self.post_id,
            user_id: self.user_id,
        })
    }
}

/// The "edit comment" dialog. `post_id` names the list to patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommentForm {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub body: String,
}

impl EditCommentForm {
    pub fn validate(&self) -> Result<UpdateCommentRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let body = self.body.trim();
        if body.is_empty() {
            errors.push("body", "is required");
        }
        errors.into_result(UpdateCommentRequest {
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_comment_is_rejected() {
        let form = NewCommentForm::new(1, 1);
        assert_eq!(
            form.validate().expect_err("blank").field("body"),
            Some("is required")
        );
    }

    #[test]
    fn comment_body_is_trimmed() {
        let form = EditCommentForm {
            comment_id: 4,
            post_id: 1,
            body: " edited ".to_string(),
        };
        assert_eq!(form.validate().expect("valid").body, "edited");
    }
}
