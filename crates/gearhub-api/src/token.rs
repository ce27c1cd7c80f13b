//! Stateless session tokens. A token is a signed HS256 JWT carrying the
//! username and an expiry 24 hours after issuance. There is no
//! server-side session table, so a token cannot be revoked before it
//! expires; the auth extractor re-resolves the username to a live user
//! record on every request, which bounds the staleness window to a
//! deleted user's remaining token lifetime.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn ttl() -> Duration {
    Duration::hours(24)
}

pub fn issue(secret: &str, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: username.to_string(),
        exp: (Utc::now() + ttl()).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn verify(secret: &str, token: &str) -> jsonwebtoken::errors::Result<Claims> {
    let mut validation = Validation::default();
    // Expiry is exact: a token is good until 24h after issuance and not
    // one second longer.
    validation.leeway = 0;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}
