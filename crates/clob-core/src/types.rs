//! Core domain types for order sizing and signing.

pub mod book;
pub mod order;

pub use book::*;
pub use order::*;
