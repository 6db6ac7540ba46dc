//! Teams, members, roles, grants, and ownership transfer.

pub mod service;

pub use service::{TeamDetail, TeamService};
