//! Team documents.

pub mod service;

pub use service::{DocumentService, UploadDocument};
