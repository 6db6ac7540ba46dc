//! Route definitions for the TeamBoard HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Multipart framing allowance on top of the largest accepted file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let max_upload = state
        .config
        .documents
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(team_routes())
        .merge(invite_routes())
        .merge(task_routes())
        .merge(column_routes())
        .merge(card_routes())
        .merge(document_routes(max_upload))
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::compression::build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration and login
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
}

/// Profile of the caller
fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/me",
        get(handlers::user::get_profile).put(handlers::user::update_profile),
    )
}

/// Teams, members, grants, audit log
fn team_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/teams",
            get(handlers::team::list_teams).post(handlers::team::create_team),
        )
        .route(
            "/teams/{team_id}",
            get(handlers::team::get_team).put(handlers::team::rename_team),
        )
        .route("/teams/{team_id}/members", get(handlers::team::list_members))
        .route(
            "/teams/{team_id}/members/{member_id}",
            delete(handlers::team::remove_member),
        )
        .route(
            "/teams/{team_id}/members/{member_id}/role",
            put(handlers::team::change_role),
        )
        .route(
            "/teams/{team_id}/members/{member_id}/grants",
            put(handlers::team::set_grant),
        )
        .route(
            "/teams/{team_id}/members/{member_id}/grants/{grant_id}",
            delete(handlers::team::delete_grant),
        )
        .route(
            "/teams/{team_id}/transfer-ownership",
            post(handlers::team::transfer_ownership),
        )
        .route("/teams/{team_id}/audit", get(handlers::audit::list_audit))
}

/// Team invites
fn invite_routes() -> Router<AppState> {
    Router::new()
        .route("/invites/pending", get(handlers::invite::list_pending))
        .route(
            "/invites/teams/{team_id}",
            get(handlers::invite::list_team_invites).post(handlers::invite::create_invite),
        )
        .route(
            "/invites/teams/{team_id}/invites",
            post(handlers::invite::create_invite),
        )
        .route(
            "/invites/{invite_id}/accept",
            post(handlers::invite::accept_invite),
        )
        .route(
            "/invites/{invite_id}/reject",
            post(handlers::invite::reject_invite),
        )
        .route(
            "/invites/{invite_id}",
            delete(handlers::invite::revoke_invite),
        )
}

/// Board tasks
fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tasks",
            get(handlers::task::list_tasks).post(handlers::task::create_task),
        )
        .route("/tasks/stats", get(handlers::task::task_stats))
        .route(
            "/tasks/column/{column_id}",
            get(handlers::task::list_by_column),
        )
        .route(
            "/tasks/{id}",
            get(handlers::task::get_task)
                .put(handlers::task::update_task)
                .delete(handlers::task::delete_task),
        )
        .route("/tasks/{id}/move", patch(handlers::task::move_task))
        .route("/tasks/{id}/toggle", put(handlers::task::toggle_task))
}

/// Board columns
fn column_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/columns",
            get(handlers::column::list_columns).post(handlers::column::create_column),
        )
        .route("/columns/reorder", put(handlers::column::reorder_columns))
        .route(
            "/columns/{id}",
            get(handlers::column::get_column)
                .put(handlers::column::update_column)
                .delete(handlers::column::delete_column),
        )
}

/// Dashboard cards
fn card_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cards",
            get(handlers::card::list_cards).post(handlers::card::create_card),
        )
        .route(
            "/cards/{id}",
            get(handlers::card::get_card)
                .put(handlers::card::update_card)
                .delete(handlers::card::delete_card),
        )
}

/// Team documents, with their own body limit
fn document_routes(max_upload: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/documents",
            get(handlers::document::list_documents).post(handlers::document::upload_document),
        )
        .route(
            "/documents/{id}",
            delete(handlers::document::delete_document),
        )
        .route(
            "/documents/{id}/download",
            get(handlers::document::download_document),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload))
}

/// Liveness, no authentication
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
