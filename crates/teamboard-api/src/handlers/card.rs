//! Dashboard card handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use teamboard_entity::card::Card;

use crate::dto::request::CardRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/cards
pub async fn list_cards(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Card>>>, ApiError> {
    let cards = state.card_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(cards)))
}

/// GET /api/cards/{id}
pub async fn get_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Card>>, ApiError> {
    let card = state.card_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(card)))
}

/// POST /api/cards
pub async fn create_card(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Card>>), ApiError> {
    let card = state.card_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(card))))
}

/// PUT /api/cards/{id}
pub async fn update_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CardRequest>,
) -> Result<Json<ApiResponse<Card>>, ApiError> {
    let card = state.card_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(card)))
}

/// DELETE /api/cards/{id}
pub async fn delete_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.card_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
