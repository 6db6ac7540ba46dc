//! Convenience result type alias for TeamBoard.

use crate::error::AppError;

/// A specialized `Result` type for TeamBoard operations.
pub type AppResult<T> = Result<T, AppError>;
