//! # teamboard-api
//!
//! HTTP API layer for TeamBoard built on Axum.
//!
//! Provides the REST endpoints under `/api`, middleware (CORS, request
//! logging, compression, timeouts), extractors, DTOs, and the mapping from
//! [`teamboard_core::error::AppError`] to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
