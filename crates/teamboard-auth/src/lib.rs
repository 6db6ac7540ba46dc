//! # teamboard-auth
//!
//! Authentication and team authorization for TeamBoard.
//!
//! ## Modules
//!
//! - `jwt`: access token creation and validation
//! - `password`: Argon2id hashing and strength policy
//! - `team`: the pure role/grant check and the membership-aware authorizer

pub mod jwt;
pub mod password;
pub mod team;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use team::{TeamAccess, TeamAuthorizer};
