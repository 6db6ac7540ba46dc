//! # teamboard-entity
//!
//! Domain entity models for TeamBoard. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! Entities serialize with camelCase field names, which is the wire format
//! of the HTTP API.

pub mod audit;
pub mod board;
pub mod card;
pub mod column;
pub mod document;
pub mod task;
pub mod team;
pub mod user;
