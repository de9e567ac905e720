use postdash_api_types::{User, UserId, UserListQuery, UsersResponse};

use crate::infra::http::{ApiClient, ApiError};

/// `GET /users?limit&select`
pub async fn list(api: &ApiClient, query: &UserListQuery) -> Result<UsersResponse, ApiError> {
    api.get(&["users"], &query.to_pairs()).await
}

/// `GET /users/:id`
pub async fn get(api: &ApiClient, id: UserId) -> Result<User, ApiError> {
    let id = id.to_string();
    api.get(&["users", id.as_str()], &[]).await
}
