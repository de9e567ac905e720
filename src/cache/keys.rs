//! Query key definitions.
//!
//! `QueryKey` names one cache entry; `QueryScope` selects a family of entries
//! for invalidation.

use std::fmt;

use postdash_api_types::{PostId, UserId, UserListQuery};

use crate::filter::{SortBy, SortOrder};

/// Server-side sort applied to the default listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub by: SortBy,
    pub order: SortOrder,
}

/// The normalized list request a filter resolves to.
///
/// Two filters that produce the same request share a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostListKey {
    ByTag {
        tag: String,
        limit: u32,
        skip: u32,
    },
    Search {
        q: String,
        limit: u32,
        skip: u32,
    },
    Page {
        limit: u32,
        skip: u32,
        sort: Option<SortKey>,
    },
}

/// Identifies one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    PostList(PostListKey),
    PostDetail(PostId),
    CommentList(PostId),
    UserList(UserListQuery),
    UserDetail(UserId),
    TagList,
}

/// Selects a family of cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryScope {
    All,
    Posts,
    PostLists,
    PostDetails,
    Comments,
    CommentList(PostId),
    Users,
    Tags,
}

impl QueryScope {
    pub fn contains(&self, key: &QueryKey) -> bool {
        match (self, key) {
            (Self::All, _) => true,
            (Self::Posts, QueryKey::PostList(_) | QueryKey::PostDetail(_)) => true,
            (Self::PostLists, QueryKey::PostList(_)) => true,
            (Self::PostDetails, QueryKey::PostDetail(_)) => true,
            (Self::Comments, QueryKey::CommentList(_)) => true,
            (Self::CommentList(id), QueryKey::CommentList(post_id)) => id == post_id,
            (Self::Users, QueryKey::UserList(_) | QueryKey::UserDetail(_)) => true,
            (Self::Tags, QueryKey::TagList) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PostListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByTag { tag, limit, skip } => write!(f, "tag={tag}&limit={limit}&skip={skip}"),
            Self::Search { q, limit, skip } => write!(f, "q={q}&limit={limit}&skip={skip}"),
            Self::Page { limit, skip, sort } => {
                write!(f, "limit={limit}&skip={skip}")?;
                if let Some(sort) = sort {
                    write!(f, "&sortBy={}&order={}", sort.by, sort.order)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PostList(list) => write!(f, "posts/list/{list}"),
            Self::PostDetail(id) => write!(f, "posts/detail/{id}"),
            Self::CommentList(post_id) => write!(f, "comments/post/{post_id}"),
            Self::UserList(query) => {
                write!(f, "users/list/limit={}", query.limit)?;
                if !query.select.is_empty() {
                    write!(f, "&select={}", query.select.join(","))?;
                }
                Ok(())
            }
            Self::UserDetail(id) => write!(f, "users/detail/{id}"),
            Self::TagList => f.write_str("tags"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_scope_covers_lists_and_details_only() {
        let list = QueryKey::PostList(PostListKey::ByTag {
            tag: "test".to_string(),
            limit: 10,
            skip: 0,
        });
        let detail = QueryKey::PostDetail(1);
        let comments = QueryKey::CommentList(1);

        assert!(QueryScope::Posts.contains(&list));
        assert!(QueryScope::Posts.contains(&detail));
        assert!(!QueryScope::Posts.contains(&comments));
        assert!(QueryScope::PostLists.contains(&list));
        assert!(!QueryScope::PostLists.contains(&detail));
    }

    #[test]
    fn comment_list_scope_matches_owning_post() {
        assert!(QueryScope::CommentList(3).contains(&QueryKey::CommentList(3)));
        assert!(!QueryScope::CommentList(3).contains(&QueryKey::CommentList(4)));
        assert!(QueryScope::All.contains(&QueryKey::TagList));
    }

    #[test]
    fn keys_render_as_paths() {
        let key = QueryKey::PostList(PostListKey::Page {
            limit: 10,
            skip: 20,
            sort: Some(SortKey {
                by: SortBy::Title,
                order: SortOrder::Desc,
            }),
        });
        assert_eq!(
            key.to_string(),
            "posts/list/limit=10&skip=20&sortBy=title&order=desc"
        );
        assert_eq!(
            QueryKey::UserList(UserListQuery::authors()).to_string(),
            "users/list/limit=0&select=username,image"
        );
        assert_eq!(QueryKey::PostDetail(7).to_string(), "posts/detail/7");
        let search = QueryKey::PostList(PostListKey::Search {
            q: "love".to_string(),
            limit: 10,
            skip: 20,
        });
        assert_eq!(search.to_string(), "posts/list/q=love&limit=10&skip=20");
    }

    #[test]
    fn equal_requests_share_a_key() {
        let a = PostListKey::Page {
            limit: 10,
            skip: 0,
            sort: None,
        };
        let b = PostListKey::Page {
            limit: 10,
            skip: 0,
            sort: None,
        };
        assert_eq!(QueryKey::PostList(a), QueryKey::PostList(b));
    }
}
