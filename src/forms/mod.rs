//! Dialog form models, their validation, and drafting helpers.

mod comment;
mod post;
mod validation;

pub use comment::{EditCommentForm, NewCommentForm};
pub use post::{
    DraftStats, EditPostForm, NewPostForm, character_count, extract_hashtags, reading_minutes,
    suggest_title, summary,
};
pub use validation::{FieldError, ValidationErrors};
