//! Signing primitives for Polymarket CLOB orders and L1 authentication.
//!
//! # Architecture
//!
//! ```text
//! OrderFields ── typed_data ──► TypedDataRaw ── encode ──► digest (B256)
//!                                   │                           │
//!                       keccak256 ◄─┘                           ▼
//!                                                   sign_digest (r ‖ s ‖ v)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use clob_core::signing::{parse_private_key, sign_digest_hex, POLYGON_CHAIN_ID};
//!
//! let key = parse_private_key("0x...")?;
//! let digest = order_fields.digest(POLYGON_CHAIN_ID, false)?;
//! let signature = sign_digest_hex(&digest, &key)?;
//! ```

pub mod address;
pub mod domain;
pub mod keccak;
pub mod order_types;
pub mod signer;
pub mod typed_data;

pub use address::{address_hex, derive_address};
pub use domain::{
    clob_auth_typed_data, exchange_contract, ExchangeContract, SignatureType, CLOB_AUTH_MESSAGE,
    EXCHANGE_CONTRACTS, POLYGON_AMOY_CHAIN_ID, POLYGON_CHAIN_ID,
};
pub use keccak::keccak256;
pub use order_types::{parse_token_id, random_salt, OrderFields, SignedOrder};
pub use signer::{parse_private_key, sign_digest, sign_digest_hex, signature_hex};
pub use typed_data::{FieldType, TypedDataRaw, TypedField, TypedValue};

pub use alloy_signer_local::PrivateKeySigner;
