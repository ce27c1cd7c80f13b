use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use gearhub_db::models::GearRow;
use gearhub_types::api::GearPayload;
use gearhub_types::models::Gear;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::policy::{self, Action};

/// Public: anyone can browse the catalog.
pub async fn list_gears(State(state): State<AppState>) -> Result<Json<Vec<Gear>>, ApiError> {
    let gears = state
        .db
        .list_gears()?
        .into_iter()
        .map(|row| row.into_gear())
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(gears))
}

pub async fn create_gear(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Json(req): Json<GearPayload>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(current.role, Action::CreateGear)?;

    let row = GearRow {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        nickname: req.nickname,
        gear_id: req.gear_id,
        image_url: req.image_url,
        description: req.description,
        category: req.category.as_str().to_string(),
        created_at: Utc::now().to_rfc3339(),
    };
    state.db.insert_gear(&row)?;

    Ok(Json(row.into_gear()?))
}

/// Full overwrite of all mutable fields; id and creation time are kept.
pub async fn update_gear(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<GearPayload>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(current.role, Action::UpdateGear)?;

    let updated = state.db.update_gear(
        &id.to_string(),
        &req.name,
        &req.nickname,
        &req.gear_id,
        &req.image_url,
        &req.description,
        req.category.as_str(),
    )?;
    if !updated {
        return Err(ApiError::NotFound("gear"));
    }

    Ok(Json(serde_json::json!({ "message": "gear updated" })))
}

pub async fn delete_gear(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    policy::require(current.role, Action::DeleteGear)?;

    if !state.db.delete_gear(&id.to_string())? {
        return Err(ApiError::NotFound("gear"));
    }

    Ok(Json(serde_json::json!({ "message": "gear deleted" })))
}
