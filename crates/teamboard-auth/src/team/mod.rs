//! Team permission model: the pure role/grant check and the
//! membership-aware authorizer built on top of it.

pub mod authorizer;
pub mod policy;

pub use authorizer::{TeamAccess, TeamAuthorizer};
pub use policy::{is_allowed, scopes};
