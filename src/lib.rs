//! clob-signer: order signing and request authentication for the Polymarket CLOB.
//!
//! This is the root crate that hosts the CLI, integration tests and
//! benchmarks. The functionality lives in the workspace crates:
//!
//! - `clob-core`: EIP-712 encoding, secp256k1 signing, order sizing, config
//! - `clob-auth`: credentials, rotation, L1/L2/builder request headers
//! - `clob-trading`: order placement, batch submission, API keys, cancellation

pub use clob_auth as auth;
pub use clob_core as core;
pub use clob_trading as trading;
