use crate::favorite::FavoriteSet;
use serde::{Deserialize, Serialize};
use wayfare_shared::Masked;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Operator,
    #[serde(other)]
    Other,
}

/// The signed-in user as returned by `GET /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Bumped on avatar upload so cached images can be refreshed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_updated_at: Option<i64>,
    #[serde(default)]
    pub favorites: FavoriteSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Masked<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Masked<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: Masked<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Operators register with the agency's sign-up code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_up_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUsernameRequest {
    pub username: String,
}
