//! Kanban column entities.

pub mod model;

pub use model::{BoardColumn, CreateColumn, UpdateColumn};
