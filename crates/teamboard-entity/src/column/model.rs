//! Board column entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::board::BoardScope;

/// Columns every new board starts with: `(id, title, color)`.
pub const DEFAULT_COLUMNS: [(&str, &str, &str); 3] = [
    ("todo", "To Do", "#3b82f6"),
    ("in-progress", "In Progress", "#f59e0b"),
    ("done", "Done", "#10b981"),
];

/// A column on a kanban board.
///
/// Column ids are unique per board, so `todo` exists on every board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    /// Board-local identifier.
    pub id: String,
    /// Owning board key (see [`BoardScope::key`]).
    #[serde(skip)]
    pub board_key: String,
    /// Display title.
    pub title: String,
    /// 1-based position on the board.
    #[serde(rename = "order")]
    pub position: i32,
    /// Hex display color.
    pub color: String,
    /// When the column was created.
    pub created_at: DateTime<Utc>,
}

impl BoardColumn {
    /// The seed columns for a board.
    pub fn defaults(board: &BoardScope) -> Vec<Self> {
        let now = Utc::now();
        DEFAULT_COLUMNS
            .iter()
            .zip(1..)
            .map(|((id, title, color), position)| Self {
                id: (*id).to_string(),
                board_key: board.key(),
                title: (*title).to_string(),
                position,
                color: (*color).to_string(),
                created_at: now,
            })
            .collect()
    }
}

/// Data required to create a column.
#[derive(Debug, Clone)]
pub struct CreateColumn {
    /// Board-local identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Hex color.
    pub color: String,
}

impl CreateColumn {
    /// Materialize the column at the given position of a board.
    pub fn into_column(self, board: &BoardScope, position: i32) -> BoardColumn {
        BoardColumn {
            id: self.id,
            board_key: board.key(),
            title: self.title,
            position,
            color: self.color,
            created_at: Utc::now(),
        }
    }
}

/// Partial column update.
#[derive(Debug, Clone, Default)]
pub struct UpdateColumn {
    /// New title.
    pub title: Option<String>,
    /// New position.
    pub position: Option<i32>,
    /// New color.
    pub color: Option<String>,
}

impl UpdateColumn {
    /// Apply the update in place.
    pub fn apply_to(self, column: &mut BoardColumn) {
        if let Some(title) = self.title {
            column.title = title;
        }
        if let Some(position) = self.position {
            column.position = position;
        }
        if let Some(color) = self.color {
            column.color = color;
        }
    }
}
