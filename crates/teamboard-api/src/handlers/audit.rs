//! Team audit log handler.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use teamboard_entity::audit::AuditLogView;

use crate::dto::request::AuditQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/teams/{team_id}/audit?limit=N
pub async fn list_audit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<ApiResponse<Vec<AuditLogView>>>, ApiError> {
    let entries = state
        .audit_service
        .list(&auth, team_id, query.limit)
        .await?;
    Ok(Json(ApiResponse::ok(entries)))
}
