//! Task CRUD with board-scoped permission checks.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use teamboard_auth::team::{TeamAuthorizer, scopes};
use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_database::repositories::TaskRepository;
use teamboard_entity::audit::{AuditAction, CreateAuditLogEntry};
use teamboard_entity::task::model::DEFAULT_COLUMN_ID;
use teamboard_entity::task::{CreateTask, Task, TaskPriority, TaskStats, UpdateTask};

use crate::audit::AuditService;
use crate::board::BoardAccess;
use crate::context::RequestContext;
use crate::text;

const MAX_TITLE_LEN: usize = 200;

/// Data for a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Priority; medium when absent.
    pub priority: Option<TaskPriority>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Column; `todo` when absent or blank.
    pub column_id: Option<String>,
}

/// Partial task update. Blank titles and columns are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New completion flag.
    pub completed: Option<bool>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
    /// New column.
    pub column_id: Option<String>,
}

/// Manages tasks on personal and team boards.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    authorizer: TeamAuthorizer,
    audit: AuditService,
}

impl TaskService {
    /// Creates a new task service.
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        authorizer: TeamAuthorizer,
        audit: AuditService,
    ) -> Self {
        Self {
            tasks,
            authorizer,
            audit,
        }
    }

    /// Tasks of the board, newest first.
    pub async fn list(&self, ctx: &RequestContext, team_id: Option<Uuid>) -> AppResult<Vec<Task>> {
        let board = self.board(ctx, team_id).await?;
        self.tasks.list(board.scope()).await
    }

    /// One task of the board.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        task_id: Uuid,
    ) -> AppResult<Task> {
        let board = self.board(ctx, team_id).await?;
        self.find(&board, task_id).await
    }

    /// Tasks in one column, oldest first.
    pub async fn list_by_column(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        column_id: &str,
    ) -> AppResult<Vec<Task>> {
        let board = self.board(ctx, team_id).await?;
        self.tasks.list_by_column(board.scope(), column_id).await
    }

    /// Board header counters.
    pub async fn stats(&self, ctx: &RequestContext, team_id: Option<Uuid>) -> AppResult<TaskStats> {
        let tasks = self.list(ctx, team_id).await?;
        Ok(TaskStats::from_tasks(&tasks, ctx.request_time))
    }

    /// Creates a task. Team boards require `tasks:write`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        req: CreateTaskRequest,
    ) -> AppResult<Task> {
        let board = self.board(ctx, team_id).await?;
        board.require(scopes::TASKS_WRITE)?;

        let task = CreateTask {
            board: *board.scope(),
            user_id: ctx.user_id,
            title: text::required("Title", &req.title, MAX_TITLE_LEN)?,
            description: req.description,
            priority: req.priority.unwrap_or_default(),
            due_date: req.due_date,
            column_id: text::non_blank(req.column_id)
                .unwrap_or_else(|| DEFAULT_COLUMN_ID.to_string()),
        }
        .into_task();
        let task = self.tasks.insert(task).await?;

        self.record(&board, ctx, AuditAction::TaskCreated, &task).await;
        info!(task_id = %task.id, board = %board.scope(), "Task created");

        Ok(task)
    }

    /// Applies a partial update. Team boards require `tasks:write`.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        task_id: Uuid,
        req: UpdateTaskRequest,
    ) -> AppResult<Task> {
        let title = match text::non_blank(req.title) {
            Some(title) => Some(text::required("Title", &title, MAX_TITLE_LEN)?),
            None => None,
        };
        let update = UpdateTask {
            title,
            description: req.description,
            completed: req.completed,
            priority: req.priority,
            due_date: req.due_date,
            column_id: text::non_blank(req.column_id),
        };
        self.modify(ctx, team_id, task_id, |task| task.apply(update))
            .await
    }

    /// Moves a task to another column.
    pub async fn move_to_column(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        task_id: Uuid,
        column_id: &str,
    ) -> AppResult<Task> {
        let column_id = text::required("Column", column_id, MAX_TITLE_LEN)?;
        let update = UpdateTask {
            column_id: Some(column_id),
            ..UpdateTask::default()
        };
        self.modify(ctx, team_id, task_id, |task| task.apply(update))
            .await
    }

    /// Flips the completion flag.
    pub async fn toggle(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        task_id: Uuid,
    ) -> AppResult<Task> {
        self.modify(ctx, team_id, task_id, |task| {
            let update = UpdateTask {
                completed: Some(!task.completed),
                ..UpdateTask::default()
            };
            task.apply(update);
        })
        .await
    }

    /// Deletes a task. On team boards the creator may always delete their
    /// own task; anyone else needs `tasks:delete`.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        task_id: Uuid,
    ) -> AppResult<()> {
        let board = self.board(ctx, team_id).await?;
        let task = self.find(&board, task_id).await?;
        if task.user_id != ctx.user_id {
            board.require(scopes::TASKS_DELETE)?;
        }

        if !self.tasks.delete(board.scope(), task_id).await? {
            return Err(AppError::not_found("Task not found"));
        }

        self.record(&board, ctx, AuditAction::TaskDeleted, &task).await;
        info!(task_id = %task_id, board = %board.scope(), "Task deleted");

        Ok(())
    }

    async fn modify(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        task_id: Uuid,
        change: impl FnOnce(&mut Task),
    ) -> AppResult<Task> {
        let board = self.board(ctx, team_id).await?;
        board.require(scopes::TASKS_WRITE)?;

        let mut task = self.find(&board, task_id).await?;
        change(&mut task);
        let task = self.tasks.save(task).await?;

        self.record(&board, ctx, AuditAction::TaskUpdated, &task).await;

        Ok(task)
    }

    async fn board(&self, ctx: &RequestContext, team_id: Option<Uuid>) -> AppResult<BoardAccess> {
        BoardAccess::resolve(&self.authorizer, ctx, team_id).await
    }

    async fn find(&self, board: &BoardAccess, task_id: Uuid) -> AppResult<Task> {
        self.tasks
            .find(board.scope(), task_id)
            .await?
            .ok_or_else(|| AppError::not_found("Task not found"))
    }

    /// Team boards only.
    async fn record(&self, board: &BoardAccess, ctx: &RequestContext, action: AuditAction, task: &Task) {
        if let Some(team_id) = board.scope().team_id() {
            self.audit
                .record(
                    CreateAuditLogEntry::new(team_id, ctx.user_id, action)
                        .entity(task.id)
                        .details(&task.title),
                )
                .await;
        }
    }
}
