//! Team document entities.

pub mod model;

pub use model::{CreateDocument, Document, DocumentSummary};
