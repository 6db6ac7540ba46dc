//! # teamboard-core
//!
//! Core crate for TeamBoard. Contains the configuration schema and the
//! unified error system used by every other crate in the workspace.
//!
//! This crate has **no** internal dependencies on other TeamBoard crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
