pub mod auth;
pub mod error;
pub mod extract;
pub mod gears;
pub mod policy;
pub mod suggestions;
pub mod token;
pub mod users;

pub use auth::{AppState, AppStateInner};
pub use error::ApiError;

use axum::{
    Router,
    routing::{get, post, put},
};

/// Full route table. Listing gears, submitting suggestions and logging
/// in take no token; every other handler authenticates the caller via
/// the `AuthUser` extractor and checks its role against the policy
/// table.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/create-user", post(auth::create_user))
        .route("/gears", get(gears::list_gears).post(gears::create_gear))
        .route(
            "/gears/{id}",
            put(gears::update_gear).delete(gears::delete_gear),
        )
        .route(
            "/suggestions",
            get(suggestions::list_suggestions).post(suggestions::submit_suggestion),
        )
        .route(
            "/suggestions/{id}/approve",
            put(suggestions::approve_suggestion),
        )
        .route(
            "/suggestions/{id}/reject",
            put(suggestions::reject_suggestion),
        )
        .route("/users", get(users::list_users))
        .route("/me", get(auth::me))
        .with_state(state)
}
