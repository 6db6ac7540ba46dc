//! # teamboard-database
//!
//! Persistence for TeamBoard. Repository traits describe what the services
//! need; [`repositories`] implements them on PostgreSQL with sqlx, and
//! [`memory`] implements them on process-local tables. [`store::Repositories`]
//! bundles one implementation of each, selected by configuration.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use store::Repositories;
