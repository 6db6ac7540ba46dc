//! Dashboard card repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_entity::card::Card;

use super::db_error;

/// Storage for a user's dashboard cards.
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Cards of a user, oldest first.
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Card>>;

    /// One card of a user.
    async fn find(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Card>>;

    /// Insert a card.
    async fn insert(&self, card: Card) -> AppResult<Card>;

    /// Persist the editable fields of a card.
    async fn save(&self, card: Card) -> AppResult<Card>;

    /// Delete a card of a user.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL card repository.
#[derive(Debug, Clone)]
pub struct PgCardRepository {
    pool: PgPool,
}

impl PgCardRepository {
    /// Create a new card repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardRepository for PgCardRepository {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Card>> {
        sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE user_id = $1 ORDER BY created_at")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list cards"))
    }

    async fn find(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Card>> {
        sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find card"))
    }

    async fn insert(&self, card: Card) -> AppResult<Card> {
        sqlx::query_as::<_, Card>(
            r#"INSERT INTO cards (id, user_id, title, value, icon, color, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(card.id)
        .bind(card.user_id)
        .bind(&card.title)
        .bind(&card.value)
        .bind(&card.icon)
        .bind(&card.color)
        .bind(card.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create card"))
    }

    async fn save(&self, card: Card) -> AppResult<Card> {
        sqlx::query_as::<_, Card>(
            r#"UPDATE cards SET title = $3, value = $4, icon = $5, color = $6
               WHERE user_id = $1 AND id = $2
               RETURNING *"#,
        )
        .bind(card.user_id)
        .bind(card.id)
        .bind(&card.title)
        .bind(&card.value)
        .bind(&card.icon)
        .bind(&card.color)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update card"))?
        .ok_or_else(|| AppError::not_found(format!("Card {} not found", card.id)))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cards WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete card"))?;
        Ok(result.rows_affected() > 0)
    }
}
