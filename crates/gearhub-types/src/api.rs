use serde::{Deserialize, Serialize};

use crate::models::{Category, Role};

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

// -- Gears & suggestions --

/// Shared body for creating a gear, updating a gear, and submitting a
/// suggestion. All fields are required; `category` must be one of the
/// recognized tags or deserialization fails.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GearPayload {
    pub name: String,
    pub nickname: String,
    pub gear_id: String,
    pub image_url: String,
    pub description: String,
    pub category: Category,
}
