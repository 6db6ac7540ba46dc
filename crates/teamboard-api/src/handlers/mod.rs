//! Route handlers organized by domain.

pub mod audit;
pub mod auth;
pub mod card;
pub mod column;
pub mod document;
pub mod health;
pub mod invite;
pub mod task;
pub mod team;
pub mod user;
