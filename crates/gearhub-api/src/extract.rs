use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use gearhub_types::models::User;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::token;

/// Extractor for the authenticated caller. Validates the bearer token,
/// then resolves the embedded username to a live user record; a valid
/// token whose user no longer exists is treated the same as no token.
/// The role comes from the store, not the token, so role changes take
/// effect on the next request rather than at token renewal.
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let bearer = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthenticated)?;

        let claims =
            token::verify(&state.jwt_secret, bearer).map_err(|_| ApiError::Unauthenticated)?;

        let user = state
            .db
            .get_user_by_username(&claims.sub)?
            .ok_or(ApiError::Unauthenticated)?
            .into_user()?;

        Ok(AuthUser(user))
    }
}
