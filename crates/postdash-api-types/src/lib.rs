//! Wire types for the posts dashboard REST API.
//!
//! Field names follow the API's camelCase JSON; optional fields are modelled
//! as `Option` so callers check presence explicitly.

mod comments;
mod posts;
mod tags;
mod users;

pub use comments::{
    Comment, CommentAuthor, CommentId, CommentsResponse, CreateCommentRequest,
    LikeCommentRequest, UpdateCommentRequest,
};
pub use posts::{
    CreatePostRequest, Post, PostId, PostsResponse, Reactions, UpdatePostRequest,
};
pub use tags::Tag;
pub use users::{Address, Company, User, UserId, UserListQuery, UsersResponse};
