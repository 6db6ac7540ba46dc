//! Auth handlers: register and login.

use axum::Json;
use axum::extract::State;

use teamboard_service::auth::AuthResponse;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let response = state.auth_service.register(req.into()).await?;
    Ok(Json(ApiResponse::ok(response)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let response = state.auth_service.login(req.into()).await?;
    Ok(Json(ApiResponse::ok(response)))
}
