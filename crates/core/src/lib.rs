//! Core dashboard services.
//!
//! Sits between the UI layer and `stocksphere-market-data`: owns the
//! persisted watchlist and settings stores and orchestrates provider
//! calls into dashboard-shaped responses.

pub mod dashboard;
pub mod errors;
pub mod settings;
pub mod watchlist;

pub use errors::{Error, Result};
