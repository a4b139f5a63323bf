//! Ethereum address derivation from a private key.

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;

use super::keccak::keccak256;

/// Derive the 20-byte address of a private key.
///
/// Uncompressed public key (`0x04 || X || Y`), drop the prefix byte, hash the
/// 64 remaining bytes and keep the last 20 bytes of the digest.
pub fn derive_address(key: &PrivateKeySigner) -> Address {
    let public_key = key.credential().verifying_key().to_encoded_point(false);
    let hash = keccak256(&public_key.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Lowercase `0x`-prefixed hex form used in headers and order bodies.
pub fn address_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}
