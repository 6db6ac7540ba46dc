//! Kanban tasks on personal and team boards.

pub mod service;

pub use service::{CreateTaskRequest, TaskService, UpdateTaskRequest};
