use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use gearhub_db::Database;
use gearhub_db::models::UserRow;
use gearhub_types::api::{CreateUserRequest, LoginRequest, LoginResponse};
use gearhub_types::models::{Role, User};

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::policy::{self, Action};
use crate::token;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Same failure for unknown username and wrong password.
    let user = state
        .db
        .get_user_by_username(&req.username)?
        .ok_or(ApiError::Unauthenticated)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::Unauthenticated);
    }

    let role =
        Role::parse(&user.role).ok_or_else(|| anyhow!("unknown stored role '{}'", user.role))?;
    let access_token = token::issue(&state.jwt_secret, &user.username)?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        role,
    }))
}

pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(current.role, Action::CreateUser)?;

    if req.username.is_empty() {
        return Err(ApiError::Validation("username must not be empty".into()));
    }
    // Exact, case-sensitive match.
    if state.db.get_user_by_username(&req.username)?.is_some() {
        return Err(ApiError::Conflict("username already exists".into()));
    }

    let row = UserRow {
        id: Uuid::new_v4().to_string(),
        username: req.username,
        password_hash: hash_password(&req.password)?,
        role: req.role.as_str().to_string(),
        created_at: Utc::now().to_rfc3339(),
    };
    state.db.create_user(&row)?;

    Ok(Json(serde_json::json!({ "message": "user created" })))
}

/// Current identity, password hash stripped (it never leaves the db
/// layer in the first place).
pub async fn me(AuthUser(current): AuthUser) -> Json<User> {
    Json(current)
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Idempotent bootstrap: create the `root` Owner account on first
/// startup, skip on every later one. Returns whether a user was
/// created. Callers log failures instead of aborting startup.
pub fn ensure_root_user(db: &Database, password: &str) -> anyhow::Result<bool> {
    if db.get_user_by_username("root")?.is_some() {
        return Ok(false);
    }

    db.create_user(&UserRow {
        id: Uuid::new_v4().to_string(),
        username: "root".to_string(),
        password_hash: hash_password(password)?,
        role: Role::Owner.as_str().to_string(),
        created_at: Utc::now().to_rfc3339(),
    })?;
    info!("Root user created");
    Ok(true)
}
