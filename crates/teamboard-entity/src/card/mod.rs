//! Dashboard card entities.

pub mod model;

pub use model::{Card, CardInput};
