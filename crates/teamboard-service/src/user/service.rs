//! User self-service operations: profile viewing and editing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_database::repositories::UserRepository;
use teamboard_entity::user::{UpdateUserProfile, User};

use crate::context::RequestContext;
use crate::text;

/// Handles user self-service operations.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

/// Data for updating a user's own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    pub full_name: Option<String>,
    /// New avatar URL; an empty string clears it.
    pub avatar_url: Option<String>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Gets the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> AppResult<User> {
        let full_name = req
            .full_name
            .map(|name| text::required("Full name", &name, 200))
            .transpose()?;
        let custom_avatar_url = req.avatar_url.map(|url| {
            let url = url.trim();
            (!url.is_empty()).then(|| url.to_string())
        });

        let user = self
            .users
            .update_profile(
                ctx.user_id,
                UpdateUserProfile {
                    full_name,
                    custom_avatar_url,
                },
            )
            .await?;

        info!(user_id = %ctx.user_id, "Profile updated");

        Ok(user)
    }
}
