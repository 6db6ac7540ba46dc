//! Team invites.

pub mod service;

pub use service::InviteService;
