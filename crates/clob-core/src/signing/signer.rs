//! Recoverable secp256k1 signatures over 32-byte digests.
//!
//! Nonces are RFC6979-deterministic, so the same digest and key always
//! produce the same signature.

use alloy_primitives::B256;
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

use crate::{Error, Result};

/// Length of a compact recoverable signature: `r || s || v`.
pub const SIGNATURE_LEN: usize = 65;

/// Parse a hex-encoded private key, with or without `0x`.
pub fn parse_private_key(key: &str) -> Result<PrivateKeySigner> {
    let key_clean = key.trim().trim_start_matches("0x");

    let mut bytes = [0u8; 32];
    hex::decode_to_slice(key_clean, &mut bytes).map_err(|_| {
        Error::config("Invalid private key format - expected 64 hex characters")
    })?;

    PrivateKeySigner::from_bytes(&B256::from(bytes))
        .map_err(|e| Error::config(format!("Invalid private key: {}", e)))
}

/// Sign a digest, returning `r (32) || s (32) || v (1)` with `v = recovery_id + 27`.
pub fn sign_digest(digest: &B256, key: &PrivateKeySigner) -> Result<[u8; SIGNATURE_LEN]> {
    let signature = key.sign_hash_sync(digest).map_err(|e| Error::Signing {
        message: format!("Failed to sign digest: {}", e),
    })?;

    let mut out = [0u8; SIGNATURE_LEN];
    out[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
    out[32..64].copy_from_slice(&signature.s().to_be_bytes::<32>());
    out[64] = signature.v() as u8 + 27;
    Ok(out)
}

/// Render a signature as `0x` + 130 lowercase hex characters.
pub fn signature_hex(signature: &[u8; SIGNATURE_LEN]) -> String {
    format!("0x{}", hex::encode(signature))
}

/// Sign a digest and render it for transport.
pub fn sign_digest_hex(digest: &B256, key: &PrivateKeySigner) -> Result<String> {
    Ok(signature_hex(&sign_digest(digest, key)?))
}
