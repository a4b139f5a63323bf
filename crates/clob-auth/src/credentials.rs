//! Signing credentials: the L1 key plus optional L2 and builder API keys.

use alloy_primitives::Address;
use base64::Engine;
use clob_core::signing::{derive_address, parse_private_key, PrivateKeySigner, SignatureType};
use clob_core::{Error, Result};
use hmac::{Hmac, KeyInit, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::OnceLock;
use tracing::warn;

/// API key triple used for HMAC request signing.
///
/// The secret is base64url-decoded once at construction, so a malformed
/// secret is rejected before any request is signed.
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub passphrase: String,
    secret: Vec<u8>,
}

/// Builder attribution keys share the L2 shape.
pub type BuilderCredentials = ApiCredentials;

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

impl ApiCredentials {
    #[allow(clippy::result_large_err)]
    pub fn new(
        api_key: impl Into<String>,
        secret: &str,
        passphrase: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        let passphrase = passphrase.into();
        if api_key.is_empty() || passphrase.is_empty() {
            return Err(Error::config("API key and passphrase must not be empty"));
        }

        Ok(Self {
            api_key,
            passphrase,
            secret: decode_secret(secret)?,
        })
    }

    /// HMAC-SHA256 of `message`, rendered as base64url.
    pub fn sign(&self, message: &str) -> Result<String> {
        let mut mac =
            <Hmac<Sha256> as KeyInit>::new_from_slice(&self.secret).map_err(|e| Error::Signing {
                message: format!("Failed to create HMAC: {}", e),
            })?;
        mac.update(message.as_bytes());
        Ok(base64::engine::general_purpose::URL_SAFE.encode(mac.finalize().into_bytes()))
    }
}

/// Presence of an `{api_key, secret, passphrase}` triple in the environment.
///
/// Blank variables count as unset.
enum EnvTriple {
    Complete(ApiCredentials),
    Partial,
    Absent,
}

impl EnvTriple {
    #[allow(clippy::result_large_err)]
    fn read(key: &str, secret: &str, passphrase: &str) -> Result<Self> {
        let values = [key, secret, passphrase].map(|name| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
        });
        match values {
            [Some(k), Some(s), Some(p)] => Ok(EnvTriple::Complete(ApiCredentials::new(k, &s, p)?)),
            [None, None, None] => Ok(EnvTriple::Absent),
            _ => Ok(EnvTriple::Partial),
        }
    }
}

/// `{apiKey, secret, passphrase}` as returned by the key endpoints.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub api_key: String,
    pub secret: String,
    pub passphrase: String,
}

impl TryFrom<ApiKeyResponse> for ApiCredentials {
    type Error = Error;

    fn try_from(response: ApiKeyResponse) -> Result<Self> {
        ApiCredentials::new(response.api_key, &response.secret, response.passphrase)
    }
}

/// Decode a base64url secret: `-` becomes `+`, `_` becomes `/`, then standard base64.
pub fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    let secret = secret.trim();
    if secret.is_empty() {
        return Err(Error::config("API secret must not be empty"));
    }

    let standard: String = secret
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let engine = &base64::engine::general_purpose::STANDARD;
    engine
        .decode(&standard)
        .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(&standard))
        .map_err(|e| Error::config(format!("Invalid API secret encoding: {}", e)))
}

/// An immutable credential snapshot.
///
/// Rotation never mutates a snapshot; it replaces it (see
/// [`CredentialStore`](crate::CredentialStore)).
#[derive(Clone)]
pub struct Credentials {
    key: PrivateKeySigner,
    funding_address: Option<Address>,
    signature_type: SignatureType,
    api: Option<ApiCredentials>,
    builder: Option<BuilderCredentials>,
    address: OnceLock<Address>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &"[REDACTED]")
            .field("funding_address", &self.funding_address)
            .field("signature_type", &self.signature_type)
            .field("api", &self.api)
            .field("builder", &self.builder)
            .finish()
    }
}

impl Credentials {
    /// Create from a hex private key.
    #[allow(clippy::result_large_err)]
    pub fn new(private_key: &str) -> Result<Self> {
        Ok(Self::from_signer(parse_private_key(private_key)?))
    }

    pub fn from_signer(key: PrivateKeySigner) -> Self {
        Self {
            key,
            funding_address: None,
            signature_type: SignatureType::Eoa,
            api: None,
            builder: None,
            address: OnceLock::new(),
        }
    }

    /// Load from environment variables.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let private_key = std::env::var("POLY_PRIVATE_KEY").map_err(|_| Error::Config {
            message: "POLY_PRIVATE_KEY environment variable not set".to_string(),
        })?;
        let mut credentials = Self::new(&private_key)?;

        if let Ok(funding) = std::env::var("POLY_FUNDING_ADDRESS") {
            let address = funding.trim().parse::<Address>().map_err(|e| {
                Error::config(format!("Invalid POLY_FUNDING_ADDRESS '{}': {}", funding, e))
            })?;
            credentials = credentials.with_funding_address(address);
        }

        if let Ok(signature_type) = std::env::var("POLY_SIGNATURE_TYPE") {
            credentials = credentials.with_signature_type(signature_type.parse()?);
        }

        match EnvTriple::read("POLY_API_KEY", "POLY_API_SECRET", "POLY_API_PASSPHRASE")? {
            EnvTriple::Complete(api) => credentials = credentials.with_api_credentials(api),
            EnvTriple::Partial => {
                return Err(Error::config(
                    "POLY_API_KEY, POLY_API_SECRET and POLY_API_PASSPHRASE must be set together",
                ))
            }
            EnvTriple::Absent => {}
        }

        match EnvTriple::read(
            "POLY_BUILDER_API_KEY",
            "POLY_BUILDER_SECRET",
            "POLY_BUILDER_PASSPHRASE",
        )? {
            EnvTriple::Complete(builder) => {
                credentials = credentials.with_builder_credentials(builder)
            }
            EnvTriple::Partial => {
                warn!("Incomplete builder credentials, builder headers disabled");
            }
            EnvTriple::Absent => {}
        }

        Ok(credentials)
    }

    pub fn with_funding_address(mut self, address: Address) -> Self {
        self.funding_address = Some(address);
        self
    }

    pub fn with_signature_type(mut self, signature_type: SignatureType) -> Self {
        self.signature_type = signature_type;
        self
    }

    pub fn with_api_credentials(mut self, api: ApiCredentials) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_builder_credentials(mut self, builder: BuilderCredentials) -> Self {
        self.builder = Some(builder);
        self
    }

    /// Address of the signing key, derived on first use.
    pub fn address(&self) -> Address {
        *self.address.get_or_init(|| derive_address(&self.key))
    }

    /// Address that funds orders; the signer unless configured otherwise.
    pub fn funding_address(&self) -> Address {
        self.funding_address.unwrap_or_else(|| self.address())
    }

    pub fn signature_type(&self) -> SignatureType {
        self.signature_type
    }

    pub fn signing_key(&self) -> &PrivateKeySigner {
        &self.key
    }

    pub fn api_credentials(&self) -> Option<&ApiCredentials> {
        self.api.as_ref()
    }

    /// L2 credentials, or a precondition error when none are configured.
    pub fn require_api_credentials(&self) -> Result<&ApiCredentials> {
        self.api.as_ref().ok_or_else(|| Error::MissingCredentials {
            message: "L2 API credentials are required; create or derive an API key first"
                .to_string(),
        })
    }

    pub fn builder_credentials(&self) -> Option<&BuilderCredentials> {
        self.builder.as_ref()
    }

    pub fn has_api_credentials(&self) -> bool {
        self.api.is_some()
    }
}
