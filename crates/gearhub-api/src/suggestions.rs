use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use gearhub_db::models::{DecideOutcome, SuggestionRow};
use gearhub_types::api::GearPayload;
use gearhub_types::models::{Suggestion, SuggestionStatus};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::policy::{self, Action};

/// Public submission — no token required. The payload's category is
/// already validated by the closed enum in `GearPayload`. The stored
/// record is returned, id and Pending status included.
pub async fn submit_suggestion(
    State(state): State<AppState>,
    Json(req): Json<GearPayload>,
) -> Result<Json<Suggestion>, ApiError> {
    let row = SuggestionRow {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        nickname: req.nickname,
        gear_id: req.gear_id,
        image_url: req.image_url,
        description: req.description,
        category: req.category.as_str().to_string(),
        status: SuggestionStatus::Pending.as_str().to_string(),
        approved_gear_id: None,
        created_at: Utc::now().to_rfc3339(),
    };
    state.db.insert_suggestion(&row)?;

    Ok(Json(row.into_suggestion()?))
}

/// All suggestions regardless of status, insertion order.
pub async fn list_suggestions(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    policy::require(current.role, Action::ListSuggestions)?;

    let suggestions = state
        .db
        .list_suggestions()?
        .into_iter()
        .map(|row| row.into_suggestion())
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(suggestions))
}

pub async fn approve_suggestion(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(current.role, Action::ApproveSuggestion)?;

    let gear_id = Uuid::new_v4();
    let now = Utc::now().to_rfc3339();
    match state
        .db
        .approve_suggestion(&id.to_string(), &gear_id.to_string(), &now)?
    {
        DecideOutcome::Applied => Ok(Json(serde_json::json!({
            "message": "suggestion approved and gear created",
            "gear_id": gear_id,
        }))),
        DecideOutcome::NotFound => Err(ApiError::NotFound("suggestion")),
        DecideOutcome::AlreadyDecided { status } => Err(decided_conflict(&status)),
    }
}

pub async fn reject_suggestion(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(current.role, Action::RejectSuggestion)?;

    match state.db.reject_suggestion(&id.to_string())? {
        DecideOutcome::Applied => Ok(Json(serde_json::json!({
            "message": "suggestion rejected",
        }))),
        DecideOutcome::NotFound => Err(ApiError::NotFound("suggestion")),
        DecideOutcome::AlreadyDecided { status } => Err(decided_conflict(&status)),
    }
}

fn decided_conflict(status: &str) -> ApiError {
    ApiError::Conflict(format!("suggestion already decided (status: {status})"))
}
