//! `X-Team-Id` header extraction.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use teamboard_core::error::AppError;

use crate::error::ApiError;

/// Header naming the team a board or document request acts on.
pub const TEAM_HEADER: &str = "x-team-id";

/// The team named by `X-Team-Id`, if any.
///
/// An absent or blank header selects the caller's personal board. A value
/// that is not a UUID is rejected with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamScope(pub Option<Uuid>);

impl TeamScope {
    /// The team id, for endpoints that only exist in a team context.
    pub fn required(self) -> Result<Uuid, AppError> {
        self.0
            .ok_or_else(|| AppError::validation("X-Team-Id header is required"))
    }
}

impl<S> FromRequestParts<S> for TeamScope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(TEAM_HEADER) else {
            return Ok(Self(None));
        };

        let value = value
            .to_str()
            .map_err(|_| AppError::validation("Invalid X-Team-Id header"))?
            .trim();

        if value.is_empty() {
            return Ok(Self(None));
        }

        Uuid::parse_str(value)
            .map(|id| Self(Some(id)))
            .map_err(|_| AppError::validation(format!("Invalid X-Team-Id header: {value}")).into())
    }
}
