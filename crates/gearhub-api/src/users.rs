use axum::{Json, extract::State};

use gearhub_types::models::User;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::policy::{self, Action};

/// Owner only. Conversion to the identity model drops the password
/// hashes before anything is serialized.
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
) -> Result<Json<Vec<User>>, ApiError> {
    policy::require(current.role, Action::ListUsers)?;

    let users = state
        .db
        .list_users()?
        .into_iter()
        .map(|row| row.into_user())
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(users))
}
