//! Keccak-256 as used by Ethereum (original Keccak padding, not NIST SHA3-256).

use alloy_primitives::B256;

/// Hash `data` with legacy Keccak-256.
pub fn keccak256(data: impl AsRef<[u8]>) -> B256 {
    alloy_primitives::keccak256(data)
}
