//! Kanban task entities.

pub mod model;
pub mod priority;

pub use model::{CreateTask, Task, TaskStats, UpdateTask};
pub use priority::TaskPriority;
