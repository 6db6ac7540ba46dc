//! Integration tests driving the full router over the in-memory store.


mod audit_test;
mod auth_test;
mod board_test;
mod document_test;
mod health_test;
mod invite_test;
mod task_test;
mod team_test;
