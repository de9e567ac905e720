use serde::{Deserialize, Serialize};

use crate::users::{User, UserId};

pub type PostId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reactions {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    /// Resolved client-side from the user list; the API never sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
}

impl Post {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }

    pub fn likes(&self) -> u64 {
        self.reactions.map_or(0, |r| r.likes)
    }

    pub fn dislikes(&self) -> u64 {
        self.reactions.map_or(0, |r| r.dislikes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    pub user_id: UserId,
}

/// Partial update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl UpdatePostRequest {
    /// Merge the present fields into `post`.
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title.clone_from(title);
        }
        if let Some(body) = &self.body {
            post.body.clone_from(body);
        }
        if let Some(user_id) = self.user_id {
            post.user_id = user_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_deserializes_without_optional_fields() {
        let post: Post =
            serde_json::from_str(r#"{"id":3,"title":"T","body":"B","userId":7}"#).expect("post");
        assert_eq!(post.user_id, 7);
        assert!(post.tags.is_none());
        assert_eq!(post.likes(), 0);
        assert_eq!(post.dislikes(), 0);
        assert!(!post.has_tag("rust"));
    }

    #[test]
    fn update_request_skips_absent_fields() {
        let req = UpdatePostRequest {
            title: Some("new".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).expect("json");
        assert_eq!(json, r#"{"title":"new"}"#);
    }

    #[test]
    fn update_request_merges_present_fields_only() {
        let mut post: Post = serde_json::from_str(
            r#"{"id":1,"title":"old","body":"keep","userId":2,"tags":["a"],"reactions":{"likes":4,"dislikes":1}}"#,
        )
        .expect("post");
        UpdatePostRequest {
            title: Some("new".into()),
            ..Default::default()
        }
        .apply_to(&mut post);
        assert_eq!(post.title, "new");
        assert_eq!(post.body, "keep");
        assert_eq!(post.likes(), 4);
        assert!(post.has_tag("a"));
    }
}
