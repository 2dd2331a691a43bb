//! Axum route handlers for talent profiles and likes.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::user::Role;
use crate::state::AppState;
use crate::store::LikeOutcome;
use crate::talent::registration::RegisterTalentRequest;
use crate::talent::view::TalentView;

#[derive(Debug, Serialize)]
pub struct LikedTalentsResponse {
    pub liked_talents: Vec<Uuid>,
}

/// POST /api/talent/register
pub async fn handle_register(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<RegisterTalentRequest>,
) -> Result<(StatusCode, Json<TalentView>), AppError> {
    user.require_role(Role::Talent, "register talent profiles")?;
    let caller = user.0;

    let new_profile = request.validate(&caller)?;
    let profile = state.profiles.insert(new_profile).await?;

    info!(
        "Registered talent profile {} ({}) for user {}",
        profile.id, profile.category, caller.user_id
    );
    Ok((
        StatusCode::CREATED,
        Json(TalentView::new(profile, caller.user_id, None)),
    ))
}

/// GET /api/talent/:id
///
/// Looks up by profile id first, then by owner account id.
pub async fn handle_get_talent(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<TalentView>, AppError> {
    let profile = state
        .profiles
        .find_by_id_or_owner(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Talent profile {id} not found")))?;

    Ok(Json(TalentView::new(profile, caller.user_id, None)))
}

/// POST /api/talent/:id/like
pub async fn handle_like(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    match state.profiles.add_like(id, caller.user_id).await? {
        LikeOutcome::Changed => Ok(Json(json!({ "message": "Talent liked successfully" }))),
        LikeOutcome::Unchanged => Err(AppError::Conflict("Talent already liked".to_string())),
        LikeOutcome::ProfileMissing => {
            Err(AppError::NotFound(format!("Talent profile {id} not found")))
        }
    }
}

/// DELETE /api/talent/:id/like
pub async fn handle_unlike(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    match state.profiles.remove_like(id, caller.user_id).await? {
        LikeOutcome::Changed => Ok(Json(json!({ "message": "Talent unliked successfully" }))),
        LikeOutcome::Unchanged => Err(AppError::Conflict("Talent not liked yet".to_string())),
        LikeOutcome::ProfileMissing => {
            Err(AppError::NotFound(format!("Talent profile {id} not found")))
        }
    }
}

/// GET /api/talent/likes
pub async fn handle_liked_talents(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<LikedTalentsResponse>, AppError> {
    let liked_talents = state.profiles.liked_by(caller.user_id).await?;
    Ok(Json(LikedTalentsResponse { liked_talents }))
}
