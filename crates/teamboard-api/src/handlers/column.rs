//! Board column handlers. `X-Team-Id` selects a team board.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use teamboard_entity::column::BoardColumn;

use crate::dto::request::{CreateColumnRequest, ReorderColumnsRequest, UpdateColumnRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, TeamScope, ValidatedJson};
use crate::state::AppState;

/// GET /api/columns
pub async fn list_columns(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
) -> Result<Json<ApiResponse<Vec<BoardColumn>>>, ApiError> {
    let columns = state.column_service.list(&auth, team_id).await?;
    Ok(Json(ApiResponse::ok(columns)))
}

/// GET /api/columns/{id}
pub async fn get_column(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BoardColumn>>, ApiError> {
    let column = state.column_service.get(&auth, team_id, &id).await?;
    Ok(Json(ApiResponse::ok(column)))
}

/// POST /api/columns
pub async fn create_column(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    ValidatedJson(req): ValidatedJson<CreateColumnRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BoardColumn>>), ApiError> {
    let column = state
        .column_service
        .create(&auth, team_id, &req.title, req.color)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(column))))
}

/// PUT /api/columns/{id}
pub async fn update_column(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateColumnRequest>,
) -> Result<Json<ApiResponse<BoardColumn>>, ApiError> {
    let column = state
        .column_service
        .update(&auth, team_id, &id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(column)))
}

/// PUT /api/columns/reorder
pub async fn reorder_columns(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    ValidatedJson(req): ValidatedJson<ReorderColumnsRequest>,
) -> Result<Json<ApiResponse<Vec<BoardColumn>>>, ApiError> {
    let columns = state
        .column_service
        .reorder(&auth, team_id, &req.column_ids)
        .await?;
    Ok(Json(ApiResponse::ok(columns)))
}

/// DELETE /api/columns/{id}
pub async fn delete_column(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.column_service.delete(&auth, team_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
