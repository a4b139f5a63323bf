//! Authentication for the Polymarket CLOB.
//!
//! Provides:
//! - Credential snapshots (wallet key, L2 API key, builder key)
//! - Atomic credential rotation
//! - L1 (EIP-712 `ClobAuth`) and L2 (HMAC) request headers
//! - Order assembly and signing

pub mod credentials;
pub mod headers;
pub mod order_signer;
pub mod store;

pub use credentials::{ApiCredentials, ApiKeyResponse, BuilderCredentials, Credentials};
pub use headers::{
    sign_request, sign_request_at, AuthMode, HttpMethod, RequestHeaders, CREATE_API_KEY_PATH,
    DERIVE_API_KEY_PATH,
};
pub use order_signer::OrderSigner;
pub use store::CredentialStore;
