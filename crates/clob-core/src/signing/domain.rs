//! EIP-712 domains and verifying contracts for the Polymarket CLOB.
//!
//! Orders are signed against the CTF Exchange domain, whose verifying
//! contract depends on the chain and on whether the market is routed through
//! the negative-risk exchange. API-key (L1) authentication signs a `ClobAuth`
//! struct against a fixed domain without a verifying contract.

use std::collections::BTreeMap;
use std::str::FromStr;

use alloy_primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};

use super::typed_data::{FieldType, TypedDataRaw, TypedField, TypedValue, EIP712_DOMAIN};
use crate::{Error, Result};

/// Chain ID for Polygon mainnet.
pub const POLYGON_CHAIN_ID: u64 = 137;

/// Chain ID for Polygon Amoy testnet.
pub const POLYGON_AMOY_CHAIN_ID: u64 = 80002;

/// Domain name of the CTF Exchange.
pub const CTF_EXCHANGE_DOMAIN_NAME: &str = "Polymarket CTF Exchange";

/// Domain name used for L1 API-key authentication.
pub const CLOB_AUTH_DOMAIN_NAME: &str = "ClobAuthDomain";

/// Message attested by the L1 `ClobAuth` signature.
pub const CLOB_AUTH_MESSAGE: &str = "This message attests that I control the given wallet";

const DOMAIN_VERSION: &str = "1";

/// A verifying contract entry, keyed by chain and risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeContract {
    pub chain_id: u64,
    pub neg_risk: bool,
    pub address: Address,
}

/// Exchange contracts for every supported `(chain_id, neg_risk)` pair.
pub const EXCHANGE_CONTRACTS: [ExchangeContract; 4] = [
    ExchangeContract {
        chain_id: POLYGON_CHAIN_ID,
        neg_risk: false,
        address: address!("4bFb41d5B3570DeFd03C39a9A4D8dE6Bd8B8982E"),
    },
    ExchangeContract {
        chain_id: POLYGON_CHAIN_ID,
        neg_risk: true,
        address: address!("C5d563A36AE78145C45a50134d48A1215220f80a"),
    },
    ExchangeContract {
        chain_id: POLYGON_AMOY_CHAIN_ID,
        neg_risk: false,
        address: address!("dFE02Eb6733538f8Ea35D585af8DE5958AD99E40"),
    },
    ExchangeContract {
        chain_id: POLYGON_AMOY_CHAIN_ID,
        neg_risk: true,
        address: address!("d91E80cF2E7be2e162c6513ceD06f1dD0dA35296"),
    },
];

/// Look up the verifying contract for an order.
pub fn exchange_contract(chain_id: u64, neg_risk: bool) -> Result<Address> {
    EXCHANGE_CONTRACTS
        .iter()
        .find(|c| c.chain_id == chain_id && c.neg_risk == neg_risk)
        .map(|c| c.address)
        .ok_or_else(|| Error::config(format!("unsupported chain id {}", chain_id)))
}

/// Signature type for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignatureType {
    /// Externally owned account signs for itself.
    #[default]
    #[serde(rename = "EOA")]
    Eoa,
    /// Signer controls a Polymarket proxy wallet.
    PolyProxy,
    /// Signer owns a Polymarket Gnosis Safe.
    PolyGnosisSafe,
}

impl SignatureType {
    /// Get the numeric value for signing.
    pub fn as_u8(&self) -> u8 {
        match self {
            SignatureType::Eoa => 0,
            SignatureType::PolyProxy => 1,
            SignatureType::PolyGnosisSafe => 2,
        }
    }
}

impl FromStr for SignatureType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "eoa" => Ok(SignatureType::Eoa),
            "1" | "polyproxy" | "poly_proxy" => Ok(SignatureType::PolyProxy),
            "2" | "polygnosissafe" | "poly_gnosis_safe" => Ok(SignatureType::PolyGnosisSafe),
            other => Err(Error::config(format!("unknown signature type '{}'", other))),
        }
    }
}

/// Domain fields `{name, version, chainId, verifyingContract}` for orders.
pub fn order_domain(chain_id: u64, neg_risk: bool) -> Result<Vec<TypedValue>> {
    Ok(vec![
        TypedValue::String(CTF_EXCHANGE_DOMAIN_NAME.to_string()),
        TypedValue::String(DOMAIN_VERSION.to_string()),
        TypedValue::Uint256(U256::from(chain_id)),
        TypedValue::Address(exchange_contract(chain_id, neg_risk)?),
    ])
}

/// Declared shapes of `EIP712Domain` and `Order`.
pub fn order_types() -> BTreeMap<String, Vec<TypedField>> {
    let mut types = BTreeMap::new();
    types.insert(
        EIP712_DOMAIN.to_string(),
        vec![
            TypedField::new("name", FieldType::String),
            TypedField::new("version", FieldType::String),
            TypedField::new("chainId", FieldType::Uint256),
            TypedField::new("verifyingContract", FieldType::Address),
        ],
    );
    types.insert(
        "Order".to_string(),
        vec![
            TypedField::new("salt", FieldType::Uint256),
            TypedField::new("maker", FieldType::Address),
            TypedField::new("signer", FieldType::Address),
            TypedField::new("taker", FieldType::Address),
            TypedField::new("tokenId", FieldType::Uint256),
            TypedField::new("makerAmount", FieldType::Uint256),
            TypedField::new("takerAmount", FieldType::Uint256),
            TypedField::new("expiration", FieldType::Uint256),
            TypedField::new("nonce", FieldType::Uint256),
            TypedField::new("feeRateBps", FieldType::Uint256),
            TypedField::new("side", FieldType::Uint8),
            TypedField::new("signatureType", FieldType::Uint8),
        ],
    );
    types
}

/// Build the `ClobAuth` typed data signed for L1 authentication.
///
/// The domain is always Polygon mainnet, regardless of the trading chain.
pub fn clob_auth_typed_data(address: Address, timestamp: &str, nonce: u64) -> TypedDataRaw {
    let mut types = BTreeMap::new();
    types.insert(
        EIP712_DOMAIN.to_string(),
        vec![
            TypedField::new("name", FieldType::String),
            TypedField::new("version", FieldType::String),
            TypedField::new("chainId", FieldType::Uint256),
        ],
    );
    types.insert(
        "ClobAuth".to_string(),
        vec![
            TypedField::new("address", FieldType::Address),
            TypedField::new("timestamp", FieldType::String),
            TypedField::new("nonce", FieldType::Uint256),
            TypedField::new("message", FieldType::String),
        ],
    );

    TypedDataRaw {
        primary_type: "ClobAuth".to_string(),
        domain: vec![
            TypedValue::String(CLOB_AUTH_DOMAIN_NAME.to_string()),
            TypedValue::String(DOMAIN_VERSION.to_string()),
            TypedValue::Uint256(U256::from(POLYGON_CHAIN_ID)),
        ],
        message: vec![
            TypedValue::Address(address),
            TypedValue::String(timestamp.to_string()),
            TypedValue::Uint256(U256::from(nonce)),
            TypedValue::String(CLOB_AUTH_MESSAGE.to_string()),
        ],
        types,
    }
}
