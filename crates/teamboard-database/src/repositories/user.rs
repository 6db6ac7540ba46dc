//! User repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_entity::user::{CreateUser, UpdateUserProfile, User};

use super::{db_error, violates};

/// Account storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `Conflict` when the email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Apply profile changes and return the updated user.
    async fn update_profile(&self, id: Uuid, data: UpdateUserProfile) -> AppResult<User>;
}

/// PostgreSQL user repository.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, email, password_hash, full_name, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $5)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.full_name)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "users_email_key") {
                AppError::conflict(format!("Email '{}' is already registered", data.email))
            } else {
                db_error("Failed to create user")(e)
            }
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by email"))
    }

    async fn update_profile(&self, id: Uuid, data: UpdateUserProfile) -> AppResult<User> {
        let clear_avatar = matches!(data.custom_avatar_url, Some(None));
        let avatar = data.custom_avatar_url.flatten();

        sqlx::query_as::<_, User>(
            r#"UPDATE users SET
                full_name = COALESCE($2, full_name),
                custom_avatar_url = CASE WHEN $4 THEN NULL ELSE COALESCE($3, custom_avatar_url) END,
                updated_at = NOW()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.full_name)
        .bind(avatar)
        .bind(clear_avatar)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update user"))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}
