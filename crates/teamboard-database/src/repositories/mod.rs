//! Repository traits and their PostgreSQL implementations.
//!
//! Each module defines one trait (`TeamRepository`, ...) and a `Pg*`
//! implementation over a [`sqlx::PgPool`]. The in-memory implementations
//! live in [`crate::memory`].

pub mod audit;
pub mod card;
pub mod column;
pub mod document;
pub mod invite;
pub mod task;
pub mod team;
pub mod user;

pub use audit::{AuditRepository, PgAuditRepository};
pub use card::{CardRepository, PgCardRepository};
pub use column::{ColumnRepository, PgColumnRepository};
pub use document::{DocumentRepository, PgDocumentRepository};
pub use invite::{InviteRepository, PgInviteRepository};
pub use task::{PgTaskRepository, TaskRepository};
pub use team::{PgTeamRepository, TeamRepository};
pub use user::{PgUserRepository, UserRepository};

use teamboard_core::error::{AppError, ErrorKind};

/// Wrap a sqlx error as a database error with context.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Whether a sqlx error is a unique violation of the named constraint.
pub(crate) fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
