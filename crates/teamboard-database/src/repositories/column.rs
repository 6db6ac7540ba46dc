//! Board column repository.

use async_trait::async_trait;
use sqlx::PgPool;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_entity::column::BoardColumn;

use super::{db_error, violates};

/// Storage for kanban columns, keyed by board.
#[async_trait]
pub trait ColumnRepository: Send + Sync {
    /// Columns of a board in position order.
    async fn list(&self, board_key: &str) -> AppResult<Vec<BoardColumn>>;

    /// Insert columns into a board if it has none yet, then return the
    /// board's columns.
    async fn seed(&self, board_key: &str, columns: Vec<BoardColumn>) -> AppResult<Vec<BoardColumn>>;

    /// Find one column.
    async fn find(&self, board_key: &str, id: &str) -> AppResult<Option<BoardColumn>>;

    /// Insert a column. Fails with `Conflict` on a duplicate id.
    async fn insert(&self, column: BoardColumn) -> AppResult<BoardColumn>;

    /// Persist title, position, and color of an existing column.
    async fn save(&self, column: BoardColumn) -> AppResult<BoardColumn>;

    /// Delete a column.
    async fn delete(&self, board_key: &str, id: &str) -> AppResult<bool>;

    /// Assign positions to several columns at once.
    async fn set_positions(&self, board_key: &str, positions: &[(String, i32)]) -> AppResult<()>;
}

/// PostgreSQL column repository.
#[derive(Debug, Clone)]
pub struct PgColumnRepository {
    pool: PgPool,
}

impl PgColumnRepository {
    /// Create a new column repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ColumnRepository for PgColumnRepository {
    async fn list(&self, board_key: &str) -> AppResult<Vec<BoardColumn>> {
        sqlx::query_as::<_, BoardColumn>(
            "SELECT * FROM board_columns WHERE board_key = $1 ORDER BY position, created_at",
        )
        .bind(board_key)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list columns"))
    }

    async fn seed(&self, board_key: &str, columns: Vec<BoardColumn>) -> AppResult<Vec<BoardColumn>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Serialize concurrent first reads of the same board.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(board_key)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to lock board"))?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM board_columns WHERE board_key = $1")
                .bind(board_key)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error("Failed to count columns"))?;

        if existing == 0 {
            for column in &columns {
                sqlx::query(
                    r#"INSERT INTO board_columns (board_key, id, title, position, color, created_at)
                       VALUES ($1, $2, $3, $4, $5, $6)"#,
                )
                .bind(board_key)
                .bind(&column.id)
                .bind(&column.title)
                .bind(column.position)
                .bind(&column.color)
                .bind(column.created_at)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to seed columns"))?;
            }
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit column seed"))?;

        self.list(board_key).await
    }

    async fn find(&self, board_key: &str, id: &str) -> AppResult<Option<BoardColumn>> {
        sqlx::query_as::<_, BoardColumn>(
            "SELECT * FROM board_columns WHERE board_key = $1 AND id = $2",
        )
        .bind(board_key)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find column"))
    }

    async fn insert(&self, column: BoardColumn) -> AppResult<BoardColumn> {
        sqlx::query_as::<_, BoardColumn>(
            r#"INSERT INTO board_columns (board_key, id, title, position, color, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#,
        )
        .bind(&column.board_key)
        .bind(&column.id)
        .bind(&column.title)
        .bind(column.position)
        .bind(&column.color)
        .bind(column.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "board_columns_pkey") {
                AppError::conflict(format!("Column '{}' already exists", column.id))
            } else {
                db_error("Failed to create column")(e)
            }
        })
    }

    async fn save(&self, column: BoardColumn) -> AppResult<BoardColumn> {
        sqlx::query_as::<_, BoardColumn>(
            r#"UPDATE board_columns SET title = $3, position = $4, color = $5
               WHERE board_key = $1 AND id = $2
               RETURNING *"#,
        )
        .bind(&column.board_key)
        .bind(&column.id)
        .bind(&column.title)
        .bind(column.position)
        .bind(&column.color)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update column"))?
        .ok_or_else(|| AppError::not_found(format!("Column '{}' not found", column.id)))
    }

    async fn delete(&self, board_key: &str, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM board_columns WHERE board_key = $1 AND id = $2")
            .bind(board_key)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete column"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_positions(&self, board_key: &str, positions: &[(String, i32)]) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        for (id, position) in positions {
            sqlx::query("UPDATE board_columns SET position = $3 WHERE board_key = $1 AND id = $2")
                .bind(board_key)
                .bind(id)
                .bind(position)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to reorder columns"))?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit column order"))
    }
}
