//! Dashboard summary cards.

pub mod service;

pub use service::{CardRequest, CardService};
