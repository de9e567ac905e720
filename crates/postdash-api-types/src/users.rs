use serde::{Deserialize, Serialize};

pub type UserId = u64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Address {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
}

/// A user profile. Only `id` is guaranteed; list queries with `select` return
/// a subset of the remaining fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
    #[serde(default)]
    pub total: u64,
}

/// `GET /users` parameters. `limit = 0` asks for every user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UserListQuery {
    pub limit: u32,
    pub select: Vec<String>,
}

impl UserListQuery {
    /// The lightweight author lookup used to decorate post rows.
    pub fn authors() -> Self {
        Self {
            limit: 0,
            select: vec!["username".to_string(), "image".to_string()],
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("limit", self.limit.to_string())];
        if !self.select.is_empty() {
            pairs.push(("select", self.select.join(",")));
        }
        pairs
    }
}
