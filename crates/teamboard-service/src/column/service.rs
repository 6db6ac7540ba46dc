//! Board columns, seeded with the default set on first read.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use teamboard_auth::team::{TeamAuthorizer, scopes};
use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_database::repositories::ColumnRepository;
use teamboard_entity::column::{BoardColumn, CreateColumn, UpdateColumn};

use crate::board::BoardAccess;
use crate::context::RequestContext;
use crate::text;

const MAX_TITLE_LEN: usize = 100;

/// Colors assigned to columns created without one.
const PALETTE: [&str; 8] = [
    "#3b82f6", "#f59e0b", "#10b981", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#6366f1",
];

/// Partial column update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumnRequest {
    /// New title; blank is ignored.
    pub title: Option<String>,
    /// New 1-based order.
    pub order: Option<i32>,
    /// New color; blank is ignored.
    pub color: Option<String>,
}

/// Manages the columns of personal and team boards.
#[derive(Clone)]
pub struct ColumnService {
    columns: Arc<dyn ColumnRepository>,
    authorizer: TeamAuthorizer,
}

impl ColumnService {
    /// Creates a new column service.
    pub fn new(columns: Arc<dyn ColumnRepository>, authorizer: TeamAuthorizer) -> Self {
        Self {
            columns,
            authorizer,
        }
    }

    /// Columns of the board in order, seeding the defaults for an empty
    /// board.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
    ) -> AppResult<Vec<BoardColumn>> {
        let board = self.board(ctx, team_id).await?;
        self.columns_of(&board).await
    }

    /// One column.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        column_id: &str,
    ) -> AppResult<BoardColumn> {
        let board = self.board(ctx, team_id).await?;
        self.columns_of(&board)
            .await?
            .into_iter()
            .find(|c| c.id == column_id)
            .ok_or_else(|| not_found(column_id))
    }

    /// Appends a column. Team boards require `columns:write`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        title: &str,
        color: Option<String>,
    ) -> AppResult<BoardColumn> {
        let board = self.board(ctx, team_id).await?;
        board.require(scopes::COLUMNS_WRITE)?;
        let title = text::required("Title", title, MAX_TITLE_LEN)?;

        let existing = self.columns_of(&board).await?;
        let id = new_column_id();
        let color = text::non_blank(color).unwrap_or_else(|| color_for(&id).to_string());
        let position = next_position(&existing);

        let column = self
            .columns
            .insert(CreateColumn { id, title, color }.into_column(board.scope(), position))
            .await?;

        info!(column_id = %column.id, board = %board.scope(), "Column created");

        Ok(column)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        column_id: &str,
        req: UpdateColumnRequest,
    ) -> AppResult<BoardColumn> {
        let board = self.board(ctx, team_id).await?;
        board.require(scopes::COLUMNS_WRITE)?;

        let mut column = self
            .columns_of(&board)
            .await?
            .into_iter()
            .find(|c| c.id == column_id)
            .ok_or_else(|| not_found(column_id))?;

        let title = match text::non_blank(req.title) {
            Some(title) => Some(text::required("Title", &title, MAX_TITLE_LEN)?),
            None => None,
        };
        UpdateColumn {
            title,
            position: req.order,
            color: text::non_blank(req.color),
        }
        .apply_to(&mut column);

        self.columns.save(column).await
    }

    /// Deletes a column. The last column of a board cannot be deleted.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        column_id: &str,
    ) -> AppResult<()> {
        let board = self.board(ctx, team_id).await?;
        board.require(scopes::COLUMNS_WRITE)?;

        let existing = self.columns_of(&board).await?;
        if !existing.iter().any(|c| c.id == column_id) {
            return Err(not_found(column_id));
        }
        if existing.len() <= 1 {
            return Err(AppError::validation("Cannot delete the last column of a board"));
        }

        if !self.columns.delete(&board.scope().key(), column_id).await? {
            return Err(not_found(column_id));
        }

        info!(column_id = %column_id, board = %board.scope(), "Column deleted");

        Ok(())
    }

    /// Orders columns as listed: the first id gets order 1. Unknown ids
    /// are skipped and unlisted columns keep their order.
    pub async fn reorder(
        &self,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
        column_ids: &[String],
    ) -> AppResult<Vec<BoardColumn>> {
        let board = self.board(ctx, team_id).await?;
        board.require(scopes::COLUMNS_WRITE)?;

        let existing = self.columns_of(&board).await?;
        let positions: Vec<(String, i32)> = column_ids
            .iter()
            .zip(1..)
            .filter(|(id, _)| existing.iter().any(|c| &c.id == *id))
            .map(|(id, position)| (id.clone(), position))
            .collect();

        let key = board.scope().key();
        self.columns.set_positions(&key, &positions).await?;
        self.columns.list(&key).await
    }

    async fn board(&self, ctx: &RequestContext, team_id: Option<Uuid>) -> AppResult<BoardAccess> {
        BoardAccess::resolve(&self.authorizer, ctx, team_id).await
    }

    async fn columns_of(&self, board: &BoardAccess) -> AppResult<Vec<BoardColumn>> {
        let key = board.scope().key();
        let columns = self.columns.list(&key).await?;
        if !columns.is_empty() {
            return Ok(columns);
        }
        self.columns
            .seed(&key, BoardColumn::defaults(board.scope()))
            .await
    }
}

fn not_found(column_id: &str) -> AppError {
    AppError::not_found(format!("Column '{column_id}' not found"))
}

/// `col-` followed by 12 hex digits.
fn new_column_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("col-{}", &hex[..12])
}

fn color_for(id: &str) -> &'static str {
    let hash = id
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(usize::from(b)));
    PALETTE[hash % PALETTE.len()]
}

fn next_position(columns: &[BoardColumn]) -> i32 {
    i32::try_from(columns.len()).map_or(i32::MAX, |n| n.saturating_add(1))
}
