//! Registration and login.

pub mod service;

pub use service::{AuthResponse, AuthService, LoginRequest, RegisterRequest};
