//! Board task handlers. `X-Team-Id` selects a team board.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use teamboard_entity::task::{Task, TaskStats};

use crate::dto::request::{CreateTaskRequest, MoveTaskRequest, UpdateTaskRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, TeamScope, ValidatedJson};
use crate::state::AppState;

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
) -> Result<Json<ApiResponse<Vec<Task>>>, ApiError> {
    let tasks = state.task_service.list(&auth, team_id).await?;
    Ok(Json(ApiResponse::ok(tasks)))
}

/// GET /api/tasks/stats
pub async fn task_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
) -> Result<Json<ApiResponse<TaskStats>>, ApiError> {
    let stats = state.task_service.stats(&auth, team_id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/tasks/column/{column_id}
pub async fn list_by_column(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    Path(column_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Task>>>, ApiError> {
    let tasks = state
        .task_service
        .list_by_column(&auth, team_id, &column_id)
        .await?;
    Ok(Json(ApiResponse::ok(tasks)))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state.task_service.get(&auth, team_id, id).await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiError> {
    let task = state
        .task_service
        .create(&auth, team_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(task))))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state
        .task_service
        .update(&auth, team_id, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// PATCH /api/tasks/{id}/move
pub async fn move_task(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<MoveTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state
        .task_service
        .move_to_column(&auth, team_id, id, &req.column_id)
        .await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// PUT /api/tasks/{id}/toggle
pub async fn toggle_task(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state.task_service.toggle(&auth, team_id, id).await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    TeamScope(team_id): TeamScope,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.task_service.delete(&auth, team_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
