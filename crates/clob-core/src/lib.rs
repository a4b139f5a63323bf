//! CLOB Core Library
//!
//! EIP-712 encoding, order signing primitives, order sizing and shared types
//! for the Polymarket central limit order book.

pub mod config;
pub mod error;
pub mod signing;
pub mod sizing;
pub mod types;

pub use config::{ClientConfig, Environment};
pub use error::{Error, Result};
pub use sizing::{compute_amounts, QuantityResult};
