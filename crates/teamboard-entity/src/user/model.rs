//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, stored lower-cased.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Avatar image URL chosen by the user.
    pub custom_avatar_url: Option<String>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the profile was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address (normalized by the caller).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
}

/// Profile fields a user may change on their own account.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserProfile {
    /// New display name.
    pub full_name: Option<String>,
    /// `Some(None)` clears the custom avatar.
    pub custom_avatar_url: Option<Option<String>>,
}
