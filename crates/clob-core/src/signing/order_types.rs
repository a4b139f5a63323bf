//! Order data structures used for EIP-712 signing and submission to the
//! Polymarket CLOB API.

use alloy_primitives::{Address, B256, U256};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::address::address_hex;
use super::domain::{order_domain, order_types, SignatureType};
use super::typed_data::{TypedDataRaw, TypedValue};
use crate::types::OrderSide;
use crate::{Error, Result};

/// Raw order data for EIP-712 signing.
///
/// This matches the struct used by the CTF Exchange contract. The signature
/// covers these exact values, so the struct is not modified once signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFields {
    /// Random salt for uniqueness.
    pub salt: u64,
    /// Funding address.
    pub maker: Address,
    /// Address of the signing key.
    pub signer: Address,
    /// Taker address (zero for any taker).
    pub taker: Address,
    /// Token ID of the outcome being traded.
    pub token_id: U256,
    /// Maker amount in base units.
    pub maker_amount: U256,
    /// Taker amount in base units.
    pub taker_amount: U256,
    /// Order expiration timestamp (unix seconds, 0 = none).
    pub expiration: u64,
    pub nonce: u64,
    /// Fee rate in basis points.
    pub fee_rate_bps: u64,
    pub side: OrderSide,
    pub signature_type: SignatureType,
}

impl OrderFields {
    /// Typed data for the `Order` struct against the exchange selected by
    /// `(chain_id, neg_risk)`.
    pub fn typed_data(&self, chain_id: u64, neg_risk: bool) -> Result<TypedDataRaw> {
        Ok(TypedDataRaw {
            primary_type: "Order".to_string(),
            domain: order_domain(chain_id, neg_risk)?,
            message: vec![
                TypedValue::Uint256(U256::from(self.salt)),
                TypedValue::Address(self.maker),
                TypedValue::Address(self.signer),
                TypedValue::Address(self.taker),
                TypedValue::Uint256(self.token_id),
                TypedValue::Uint256(self.maker_amount),
                TypedValue::Uint256(self.taker_amount),
                TypedValue::Uint256(U256::from(self.expiration)),
                TypedValue::Uint256(U256::from(self.nonce)),
                TypedValue::Uint256(U256::from(self.fee_rate_bps)),
                TypedValue::Uint8(self.side.as_u8()),
                TypedValue::Uint8(self.signature_type.as_u8()),
            ],
            types: order_types(),
        })
    }

    /// EIP-712 digest to sign.
    pub fn digest(&self, chain_id: u64, neg_risk: bool) -> Result<B256> {
        self.typed_data(chain_id, neg_risk)?.encode()
    }
}

/// Parse a decimal token id.
pub fn parse_token_id(token_id: &str) -> Result<U256> {
    U256::from_str_radix(token_id.trim(), 10)
        .map_err(|e| Error::invalid_order(format!("Invalid token id '{}': {}", token_id, e)))
}

/// Generate a random salt for order uniqueness.
pub fn random_salt() -> u64 {
    rand::rng().random_range(1_000_000_000_000u64..10_000_000_000_000u64)
}

/// A signed order ready for submission.
///
/// `side` is the literal `"BUY"`/`"SELL"` here while the signed digest uses
/// its `uint8` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrder {
    /// Order salt (must be a JSON number).
    pub salt: u64,
    /// Addresses are lowercase hex.
    pub maker: String,
    pub signer: String,
    pub taker: String,
    pub token_id: String,
    pub maker_amount: String,
    pub taker_amount: String,
    pub expiration: String,
    pub nonce: String,
    pub fee_rate_bps: String,
    pub side: OrderSide,
    pub signature_type: u8,
    /// Lowercase EIP-712 signature.
    pub signature: String,
}

impl SignedOrder {
    /// Create from order fields and their signature.
    pub fn new(order: &OrderFields, signature: String) -> Self {
        Self {
            salt: order.salt,
            maker: address_hex(&order.maker),
            signer: address_hex(&order.signer),
            taker: address_hex(&order.taker),
            token_id: order.token_id.to_string(),
            maker_amount: order.maker_amount.to_string(),
            taker_amount: order.taker_amount.to_string(),
            expiration: order.expiration.to_string(),
            nonce: order.nonce.to_string(),
            fee_rate_bps: order.fee_rate_bps.to_string(),
            side: order.side,
            signature_type: order.signature_type.as_u8(),
            signature: signature.to_lowercase(),
        }
    }
}
