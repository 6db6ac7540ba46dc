use async_trait::async_trait;
use uuid::Uuid;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_entity::board::BoardScope;
use teamboard_entity::card::Card;
use teamboard_entity::column::BoardColumn;
use teamboard_entity::task::Task;

use super::MemoryStore;
use crate::repositories::{CardRepository, ColumnRepository, TaskRepository};

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn insert(&self, task: Task) -> AppResult<Task> {
        self.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find(&self, board: &BoardScope, id: Uuid) -> AppResult<Option<Task>> {
        Ok(self
            .tasks
            .get(&id)
            .filter(|t| t.is_on(board))
            .map(|t| t.clone()))
    }

    async fn list(&self, board: &BoardScope) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| t.is_on(board))
            .map(|t| t.clone())
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn list_by_column(&self, board: &BoardScope, column_id: &str) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| t.is_on(board) && t.column_id == column_id)
            .map(|t| t.clone())
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }

    async fn save(&self, task: Task) -> AppResult<Task> {
        let mut stored = self
            .tasks
            .get_mut(&task.id)
            .ok_or_else(|| AppError::not_found(format!("Task {} not found", task.id)))?;
        *stored = task.clone();
        Ok(task)
    }

    async fn delete(&self, board: &BoardScope, id: Uuid) -> AppResult<bool> {
        Ok(self.tasks.remove_if(&id, |_, t| t.is_on(board)).is_some())
    }
}

fn sorted(mut columns: Vec<BoardColumn>) -> Vec<BoardColumn> {
    columns.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then(a.created_at.cmp(&b.created_at))
    });
    columns
}

#[async_trait]
impl ColumnRepository for MemoryStore {
    async fn list(&self, board_key: &str) -> AppResult<Vec<BoardColumn>> {
        let columns = self
            .columns
            .get(board_key)
            .map(|c| c.clone())
            .unwrap_or_default();
        Ok(sorted(columns))
    }

    async fn seed(&self, board_key: &str, columns: Vec<BoardColumn>) -> AppResult<Vec<BoardColumn>> {
        let mut board = self.columns.entry(board_key.to_string()).or_default();
        if board.is_empty() {
            *board = columns;
        }
        Ok(sorted(board.clone()))
    }

    async fn find(&self, board_key: &str, id: &str) -> AppResult<Option<BoardColumn>> {
        Ok(self
            .columns
            .get(board_key)
            .and_then(|c| c.iter().find(|col| col.id == id).cloned()))
    }

    async fn insert(&self, column: BoardColumn) -> AppResult<BoardColumn> {
        let mut board = self.columns.entry(column.board_key.clone()).or_default();
        if board.iter().any(|c| c.id == column.id) {
            return Err(AppError::conflict(format!(
                "Column '{}' already exists",
                column.id
            )));
        }
        board.push(column.clone());
        Ok(column)
    }

    async fn save(&self, column: BoardColumn) -> AppResult<BoardColumn> {
        let mut board = self
            .columns
            .get_mut(&column.board_key)
            .ok_or_else(|| AppError::not_found(format!("Column '{}' not found", column.id)))?;
        let stored = board
            .iter_mut()
            .find(|c| c.id == column.id)
            .ok_or_else(|| AppError::not_found(format!("Column '{}' not found", column.id)))?;
        *stored = column.clone();
        Ok(column)
    }

    async fn delete(&self, board_key: &str, id: &str) -> AppResult<bool> {
        let Some(mut board) = self.columns.get_mut(board_key) else {
            return Ok(false);
        };
        let before = board.len();
        board.retain(|c| c.id != id);
        Ok(board.len() < before)
    }

    async fn set_positions(&self, board_key: &str, positions: &[(String, i32)]) -> AppResult<()> {
        if let Some(mut board) = self.columns.get_mut(board_key) {
            for column in board.iter_mut() {
                if let Some((_, position)) = positions.iter().find(|(id, _)| *id == column.id) {
                    column.position = *position;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CardRepository for MemoryStore {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Card>> {
        let mut cards: Vec<Card> = self
            .cards
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.clone())
            .collect();
        cards.sort_by_key(|c| c.created_at);
        Ok(cards)
    }

    async fn find(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Card>> {
        Ok(self
            .cards
            .get(&id)
            .filter(|c| c.user_id == user_id)
            .map(|c| c.clone()))
    }

    async fn insert(&self, card: Card) -> AppResult<Card> {
        self.cards.insert(card.id, card.clone());
        Ok(card)
    }

    async fn save(&self, card: Card) -> AppResult<Card> {
        let mut stored = self
            .cards
            .get_mut(&card.id)
            .filter(|c| c.user_id == card.user_id)
            .ok_or_else(|| AppError::not_found(format!("Card {} not found", card.id)))?;
        *stored = card.clone();
        Ok(card)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        Ok(self
            .cards
            .remove_if(&id, |_, c| c.user_id == user_id)
            .is_some())
    }
}
