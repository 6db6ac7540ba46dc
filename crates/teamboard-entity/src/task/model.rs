//! Task entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::priority::TaskPriority;
use crate::board::BoardScope;

/// Column new tasks land in when none is given.
pub const DEFAULT_COLUMN_ID: &str = "todo";

/// A task on a personal or team board.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: Uuid,
    /// Creator.
    pub user_id: Uuid,
    /// Owning team for team-board tasks.
    pub team_id: Option<Uuid>,
    /// Short title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Priority.
    pub priority: TaskPriority,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Kanban column the task sits in.
    pub column_id: String,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether the task belongs to the given board.
    pub fn is_on(&self, board: &BoardScope) -> bool {
        match board {
            BoardScope::Personal(user_id) => self.team_id.is_none() && self.user_id == *user_id,
            BoardScope::Team(team_id) => self.team_id == Some(*team_id),
        }
    }

    /// Whether the task is open and past its due date.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(column_id) = update.column_id {
            self.column_id = column_id;
        }
        self.updated_at = Utc::now();
    }
}

/// Data required to create a task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Target board.
    pub board: BoardScope,
    /// Creator.
    pub user_id: Uuid,
    /// Title (validated).
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Priority.
    pub priority: TaskPriority,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Column; defaults to [`DEFAULT_COLUMN_ID`].
    pub column_id: String,
}

impl CreateTask {
    /// Materialize the task row.
    pub fn into_task(self) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            team_id: self.board.team_id(),
            title: self.title,
            description: self.description,
            completed: false,
            priority: self.priority,
            due_date: self.due_date,
            column_id: self.column_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial task update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
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

/// Counters shown on the board header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// All tasks.
    pub total: u64,
    /// Tasks not completed.
    pub active: u64,
    /// Completed tasks.
    pub completed: u64,
    /// Open high-priority tasks.
    pub high_priority: u64,
    /// Open tasks past their due date.
    pub overdue: u64,
}

impl TaskStats {
    /// Compute the counters over a set of tasks.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, now: DateTime<Utc>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            if task.completed {
                stats.completed += 1;
            } else {
                stats.active += 1;
                if task.priority == TaskPriority::High {
                    stats.high_priority += 1;
                }
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            stats
        })
    }
}
