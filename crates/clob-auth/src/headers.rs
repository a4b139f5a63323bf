//! Request authentication headers.
//!
//! Two tiers are used by the CLOB:
//!
//! - **L1**: an EIP-712 `ClobAuth` signature by the wallet key. Only the API
//!   key endpoints use it.
//! - **L2**: an HMAC-SHA256 over `timestamp + METHOD + path + body` keyed by
//!   the API secret. Every other authenticated endpoint uses it, optionally
//!   with a second builder HMAC over the same payload.

use crate::credentials::Credentials;
use clob_core::signing::{address_hex, clob_auth_typed_data, sign_digest_hex};
use clob_core::{Error, Result};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const POLY_ADDRESS: &str = "POLY_ADDRESS";
pub const POLY_SIGNATURE: &str = "POLY_SIGNATURE";
pub const POLY_TIMESTAMP: &str = "POLY_TIMESTAMP";
pub const POLY_NONCE: &str = "POLY_NONCE";
pub const POLY_API_KEY: &str = "POLY_API_KEY";
pub const POLY_PASSPHRASE: &str = "POLY_PASSPHRASE";
pub const POLY_BUILDER_API_KEY: &str = "POLY_BUILDER_API_KEY";
pub const POLY_BUILDER_PASSPHRASE: &str = "POLY_BUILDER_PASSPHRASE";
pub const POLY_BUILDER_SIGNATURE: &str = "POLY_BUILDER_SIGNATURE";
pub const POLY_BUILDER_TIMESTAMP: &str = "POLY_BUILDER_TIMESTAMP";

pub const CREATE_API_KEY_PATH: &str = "/auth/api-key";
pub const DERIVE_API_KEY_PATH: &str = "/auth/derive-api-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the body is part of the L2 signing payload.
    pub fn signs_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(Error::config(format!("Unsupported HTTP method '{}'", other))),
        }
    }
}

/// Authentication tier of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    L1,
    L2,
}

impl AuthMode {
    /// `POST /auth/api-key` and `GET /auth/derive-api-key` are L1, everything else L2.
    pub fn for_request(method: HttpMethod, path: &str) -> Self {
        let path = path.split('?').next().unwrap_or(path);
        match (method, path) {
            (HttpMethod::Post, CREATE_API_KEY_PATH) | (HttpMethod::Get, DERIVE_API_KEY_PATH) => {
                AuthMode::L1
            }
            _ => AuthMode::L2,
        }
    }
}

/// Ordered header list for one request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: Vec<(&'static str, String)>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.entries.push((name, value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for RequestHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.iter() {
            match name {
                POLY_SIGNATURE | POLY_PASSPHRASE | POLY_BUILDER_SIGNATURE
                | POLY_BUILDER_PASSPHRASE => map.entry(&name, &"[REDACTED]"),
                _ => map.entry(&name, &value),
            };
        }
        map.finish()
    }
}

/// `timestamp + METHOD + path (+ body for POST/DELETE)`.
pub fn sign_data(timestamp: u64, method: HttpMethod, path: &str, body: Option<&str>) -> String {
    let mut data = format!("{}{}{}", timestamp, method, path);
    if method.signs_body() {
        if let Some(body) = body {
            data.push_str(body);
        }
    }
    data
}

/// Current unix time in seconds.
pub fn unix_timestamp() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// Sign a request with the tier its endpoint requires, at the current time.
///
/// `body` must be the exact bytes that will be sent.
pub fn sign_request(
    credentials: &Credentials,
    method: HttpMethod,
    path: &str,
    body: Option<&str>,
    nonce: Option<u64>,
) -> Result<RequestHeaders> {
    sign_request_at(credentials, method, path, body, nonce, unix_timestamp())
}

/// Same as [`sign_request`] with an explicit timestamp.
pub fn sign_request_at(
    credentials: &Credentials,
    method: HttpMethod,
    path: &str,
    body: Option<&str>,
    nonce: Option<u64>,
    timestamp: u64,
) -> Result<RequestHeaders> {
    let mode = AuthMode::for_request(method, path);
    debug!(method = %method, path = %path, mode = ?mode, "Signing request");

    match mode {
        AuthMode::L1 => l1_headers(credentials, timestamp, nonce.unwrap_or(0)),
        AuthMode::L2 => l2_headers(credentials, method, path, body, timestamp),
    }
}

/// L1 headers: a `ClobAuth` EIP-712 signature by the wallet key.
pub fn l1_headers(credentials: &Credentials, timestamp: u64, nonce: u64) -> Result<RequestHeaders> {
    let address = credentials.address();
    let timestamp = timestamp.to_string();
    let digest = clob_auth_typed_data(address, &timestamp, nonce).encode()?;
    let signature = sign_digest_hex(&digest, credentials.signing_key())?;

    let mut headers = RequestHeaders::new();
    headers.insert(POLY_ADDRESS, address_hex(&address));
    headers.insert(POLY_SIGNATURE, signature.to_lowercase());
    headers.insert(POLY_TIMESTAMP, timestamp);
    headers.insert(POLY_NONCE, nonce.to_string());
    Ok(headers)
}

/// L2 headers, plus builder headers when builder credentials are configured.
pub fn l2_headers(
    credentials: &Credentials,
    method: HttpMethod,
    path: &str,
    body: Option<&str>,
    timestamp: u64,
) -> Result<RequestHeaders> {
    let api = credentials.require_api_credentials()?;
    let payload = sign_data(timestamp, method, path, body);

    let mut headers = RequestHeaders::new();
    headers.insert(POLY_ADDRESS, address_hex(&credentials.address()));
    headers.insert(POLY_API_KEY, api.api_key.clone());
    headers.insert(POLY_PASSPHRASE, api.passphrase.clone());
    headers.insert(POLY_TIMESTAMP, timestamp.to_string());
    headers.insert(POLY_SIGNATURE, api.sign(&payload)?);

    if let Some(builder) = credentials.builder_credentials() {
        headers.insert(POLY_BUILDER_API_KEY, builder.api_key.clone());
        headers.insert(POLY_BUILDER_PASSPHRASE, builder.passphrase.clone());
        headers.insert(POLY_BUILDER_SIGNATURE, builder.sign(&payload)?);
        headers.insert(POLY_BUILDER_TIMESTAMP, timestamp.to_string());
    }

    Ok(headers)
}
