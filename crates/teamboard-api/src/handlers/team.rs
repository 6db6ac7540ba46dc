//! Team, member, and grant handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use teamboard_entity::team::{MemberSummary, Team, TeamMember, TeamRoleGrant, TeamSummary};
use teamboard_service::team::TeamDetail;

use crate::dto::request::{ChangeRoleRequest, GrantRequest, TeamNameRequest, TransferOwnershipRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/teams
pub async fn list_teams(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<TeamSummary>>>, ApiError> {
    let teams = state.team_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(teams)))
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<TeamNameRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Team>>), ApiError> {
    let team = state.team_service.create(&auth, &req.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(team))))
}

/// GET /api/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
) -> Result<Json<ApiResponse<TeamDetail>>, ApiError> {
    let detail = state.team_service.get(&auth, team_id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PUT /api/teams/{team_id}
pub async fn rename_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<TeamNameRequest>,
) -> Result<Json<ApiResponse<Team>>, ApiError> {
    let team = state.team_service.rename(&auth, team_id, &req.name).await?;
    Ok(Json(ApiResponse::ok(team)))
}

/// GET /api/teams/{team_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MemberSummary>>>, ApiError> {
    let members = state.team_service.members(&auth, team_id).await?;
    Ok(Json(ApiResponse::ok(members)))
}

/// DELETE /api/teams/{team_id}/members/{member_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((team_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state
        .team_service
        .remove_member(&auth, team_id, member_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/teams/{team_id}/members/{member_id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((team_id, member_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<TeamMember>>, ApiError> {
    let member = state
        .team_service
        .change_role(&auth, team_id, member_id, &req.role)
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// POST /api/teams/{team_id}/transfer-ownership
pub async fn transfer_ownership(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<TransferOwnershipRequest>,
) -> Result<Json<ApiResponse<Team>>, ApiError> {
    let team = state
        .team_service
        .transfer_ownership(&auth, team_id, req.new_owner_id)
        .await?;
    Ok(Json(ApiResponse::ok(team)))
}

/// PUT /api/teams/{team_id}/members/{member_id}/grants
pub async fn set_grant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((team_id, member_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<GrantRequest>,
) -> Result<Json<ApiResponse<TeamRoleGrant>>, ApiError> {
    let grant = state
        .team_service
        .set_grant(&auth, team_id, member_id, &req.scope, req.grant_type)
        .await?;
    Ok(Json(ApiResponse::ok(grant)))
}

/// DELETE /api/teams/{team_id}/members/{member_id}/grants/{grant_id}
pub async fn delete_grant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((team_id, member_id, grant_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state
        .team_service
        .delete_grant(&auth, team_id, member_id, grant_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
