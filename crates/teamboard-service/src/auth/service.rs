//! Account registration and credential login.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use teamboard_auth::jwt::JwtEncoder;
use teamboard_auth::password::{PasswordHasher, PasswordValidator};
use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_database::repositories::UserRepository;
use teamboard_entity::user::{CreateUser, User};

use crate::text;

/// Handles registration and login, issuing access tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
}

/// New account data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub full_name: String,
}

/// Credentials for login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Token issued after a successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token.
    pub token: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
        }
    }

    /// Creates an account and signs the new user in.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<AuthResponse> {
        let email = text::email(&req.email)?;
        let full_name = text::required("Full name", &req.full_name, 200)?;
        self.validator
            .validate(&req.password, &[email.as_str(), full_name.as_str()])?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Email '{email}' is already registered"
            )));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .users
            .create(CreateUser {
                email,
                password_hash,
                full_name,
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        self.issue(&user)
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown emails and wrong passwords fail with the same message.
    pub async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        let invalid = || AppError::authentication("Invalid email or password");

        let user = match self.users.find_by_email(req.email.trim()).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt for unknown email");
                return Err(invalid());
            }
        };

        if !self.hasher.verify_password(&req.password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(invalid());
        }

        info!(user_id = %user.id, "User logged in");

        self.issue(&user)
    }

    fn issue(&self, user: &User) -> AppResult<AuthResponse> {
        let issued = self.encoder.issue(user.id, &user.email)?;
        Ok(AuthResponse {
            token: issued.token,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            expires_at: issued.expires_at,
        })
    }
}
