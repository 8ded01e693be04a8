//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that both providers implement
//! - Concrete provider adapters (Finnhub, Alpha Vantage)
//!
//! Each adapter owns typed serde structs for its provider's response
//! shapes.

mod traits;

pub mod alpha_vantage;
pub mod finnhub;

pub use traits::MarketDataProvider;
