//! View models for the dashboard and their plain-text rendering.

mod highlight;
mod render;
mod views;

pub use highlight::{Segment, highlight};
pub use views::{
    AuthorView, CommentView, FilterBarView, PaginationView, PostDetailView, PostRowView,
    PostTableView, SelectOption, TagChip, UserDetailView,
};
