//! Task repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_entity::board::BoardScope;
use teamboard_entity::task::Task;

use super::db_error;

/// Storage for board tasks.
///
/// Every lookup takes the board so a task id from another board behaves as
/// missing.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task row.
    async fn insert(&self, task: Task) -> AppResult<Task>;

    /// Find a task on a board.
    async fn find(&self, board: &BoardScope, id: Uuid) -> AppResult<Option<Task>>;

    /// Tasks on a board, newest first.
    async fn list(&self, board: &BoardScope) -> AppResult<Vec<Task>>;

    /// Tasks in one column of a board, oldest first.
    async fn list_by_column(&self, board: &BoardScope, column_id: &str) -> AppResult<Vec<Task>>;

    /// Persist every mutable field of an existing task.
    async fn save(&self, task: Task) -> AppResult<Task>;

    /// Delete a task from a board.
    async fn delete(&self, board: &BoardScope, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL task repository.
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new task repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `WHERE` fragment selecting one board; binds `$1` (and the id at `$2`
/// in callers that need it).
fn board_filter(board: &BoardScope) -> (&'static str, Uuid) {
    match board {
        BoardScope::Personal(user_id) => ("user_id = $1 AND team_id IS NULL", *user_id),
        BoardScope::Team(team_id) => ("team_id = $1", *team_id),
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, task: Task) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            r#"INSERT INTO tasks
                (id, user_id, team_id, title, description, completed, priority, due_date,
                 column_id, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING *"#,
        )
        .bind(task.id)
        .bind(task.user_id)
        .bind(task.team_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.priority)
        .bind(task.due_date)
        .bind(&task.column_id)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create task"))
    }

    async fn find(&self, board: &BoardScope, id: Uuid) -> AppResult<Option<Task>> {
        let (filter, key) = board_filter(board);
        sqlx::query_as::<_, Task>(&format!("SELECT * FROM tasks WHERE {filter} AND id = $2"))
            .bind(key)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find task"))
    }

    async fn list(&self, board: &BoardScope) -> AppResult<Vec<Task>> {
        let (filter, key) = board_filter(board);
        sqlx::query_as::<_, Task>(&format!(
            "SELECT * FROM tasks WHERE {filter} ORDER BY created_at DESC"
        ))
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list tasks"))
    }

    async fn list_by_column(&self, board: &BoardScope, column_id: &str) -> AppResult<Vec<Task>> {
        let (filter, key) = board_filter(board);
        sqlx::query_as::<_, Task>(&format!(
            "SELECT * FROM tasks WHERE {filter} AND column_id = $2 ORDER BY created_at ASC"
        ))
        .bind(key)
        .bind(column_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list tasks by column"))
    }

    async fn save(&self, task: Task) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            r#"UPDATE tasks SET
                title = $2, description = $3, completed = $4, priority = $5,
                due_date = $6, column_id = $7, updated_at = $8
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.priority)
        .bind(task.due_date)
        .bind(&task.column_id)
        .bind(task.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update task"))?
        .ok_or_else(|| AppError::not_found(format!("Task {} not found", task.id)))
    }

    async fn delete(&self, board: &BoardScope, id: Uuid) -> AppResult<bool> {
        let (filter, key) = board_filter(board);
        let result = sqlx::query(&format!("DELETE FROM tasks WHERE {filter} AND id = $2"))
            .bind(key)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete task"))?;
        Ok(result.rows_affected() > 0)
    }
}
