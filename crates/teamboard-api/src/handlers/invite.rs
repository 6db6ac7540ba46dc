//! Team invite handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use teamboard_entity::team::{PendingInvite, TeamInvite, TeamMember};

use crate::dto::request::InviteRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/invites/pending
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<PendingInvite>>>, ApiError> {
    let invites = state.invite_service.pending(&auth).await?;
    Ok(Json(ApiResponse::ok(invites)))
}

/// POST /api/invites/teams/{team_id}
pub async fn create_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<InviteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TeamInvite>>), ApiError> {
    let invite = state
        .invite_service
        .create(&auth, team_id, &req.email)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(invite))))
}

/// GET /api/invites/teams/{team_id}
pub async fn list_team_invites(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TeamInvite>>>, ApiError> {
    let invites = state.invite_service.list_for_team(&auth, team_id).await?;
    Ok(Json(ApiResponse::ok(invites)))
}

/// POST /api/invites/{invite_id}/accept
pub async fn accept_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invite_id): Path<Uuid>,
) -> Result<Json<ApiResponse<TeamMember>>, ApiError> {
    let member = state.invite_service.accept(&auth, invite_id).await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// POST /api/invites/{invite_id}/reject
pub async fn reject_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invite_id): Path<Uuid>,
) -> Result<Json<ApiResponse<TeamInvite>>, ApiError> {
    let invite = state.invite_service.reject(&auth, invite_id).await?;
    Ok(Json(ApiResponse::ok(invite)))
}

/// DELETE /api/invites/{invite_id}
pub async fn revoke_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invite_id): Path<Uuid>,
) -> Result<Json<ApiResponse<TeamInvite>>, ApiError> {
    let invite = state.invite_service.revoke(&auth, invite_id).await?;
    Ok(Json(ApiResponse::ok(invite)))
}
