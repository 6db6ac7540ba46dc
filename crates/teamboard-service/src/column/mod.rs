//! Kanban columns.

pub mod service;

pub use service::{ColumnService, UpdateColumnRequest};
