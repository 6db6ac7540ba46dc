//! # teamboard-service
//!
//! Business logic service layer for TeamBoard. Each service orchestrates
//! repositories, the team authorizer, and the audit log to implement one
//! area of the API.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod audit;
pub mod auth;
pub mod board;
pub mod card;
pub mod column;
pub mod context;
pub mod document;
pub mod invite;
pub mod task;
pub mod team;
pub mod user;

mod text;

#[cfg(test)]
mod testing;

pub use audit::AuditService;
pub use auth::AuthService;
pub use board::BoardAccess;
pub use card::CardService;
pub use column::ColumnService;
pub use context::RequestContext;
pub use document::DocumentService;
pub use invite::InviteService;
pub use task::TaskService;
pub use team::TeamService;
pub use user::UserService;
