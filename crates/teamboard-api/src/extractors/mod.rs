//! Custom Axum extractors.

pub mod auth;
pub mod team;
pub mod validated;

pub use auth::AuthUser;
pub use team::TeamScope;
pub use validated::ValidatedJson;
