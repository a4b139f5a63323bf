//! Client configuration for the CLOB signing engine.

use crate::signing::{exchange_contract, POLYGON_AMOY_CHAIN_ID, POLYGON_CHAIN_ID};
use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CLOB_URL: &str = "https://clob.polymarket.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Chain the client signs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Polygon,
    Amoy,
}

impl Environment {
    pub fn chain_id(&self) -> u64 {
        match self {
            Environment::Polygon => POLYGON_CHAIN_ID,
            Environment::Amoy => POLYGON_AMOY_CHAIN_ID,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Result<Self> {
        match chain_id {
            POLYGON_CHAIN_ID => Ok(Environment::Polygon),
            POLYGON_AMOY_CHAIN_ID => Ok(Environment::Amoy),
            other => Err(Error::config(format!("Unsupported chain id {}", other))),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "polygon" | "mainnet" => Ok(Environment::Polygon),
            "amoy" | "testnet" => Ok(Environment::Amoy),
            other => other
                .parse::<u64>()
                .map_err(|_| Error::config(format!("Unknown environment '{}'", s)))
                .and_then(Environment::from_chain_id),
        }
    }
}

/// Endpoint and chain settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_clob_url", alias = "url")]
    pub clob_url: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_clob_url() -> String {
    DEFAULT_CLOB_URL.to_string()
}

fn default_chain_id() -> u64 {
    POLYGON_CHAIN_ID
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            clob_url: default_clob_url(),
            chain_id: default_chain_id(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl ClientConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            chain_id: environment.chain_id(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            clob_url: env::var("CLOB_URL").unwrap_or_else(|_| default_clob_url()),
            chain_id: parse_env("CLOB_CHAIN_ID")?.unwrap_or_else(default_chain_id),
            request_timeout_secs: parse_env("CLOB_REQUEST_TIMEOUT_SECS")?
                .unwrap_or_else(default_request_timeout),
            connect_timeout_secs: parse_env("CLOB_CONNECT_TIMEOUT_SECS")?
                .unwrap_or_else(default_connect_timeout),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load an optional config file, overridden by `CLOB_`-prefixed variables.
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }
        let config: Self = builder
            .add_source(::config::Environment::with_prefix("CLOB").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn environment(&self) -> Result<Environment> {
        Environment::from_chain_id(self.chain_id)
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.clob_url.trim().is_empty() {
            return Err(Error::config("CLOB url must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::config("Request timeout must be positive"));
        }
        exchange_contract(self.chain_id, false)?;
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.clob_url.trim_end_matches('/')
    }
}

fn parse_env<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::config(format!("{} is not a valid value: '{}'", name, raw))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.clob_url, DEFAULT_CLOB_URL);
        assert_eq!(config.chain_id, POLYGON_CHAIN_ID);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("polygon".parse::<Environment>().unwrap(), Environment::Polygon);
        assert_eq!("Amoy".parse::<Environment>().unwrap(), Environment::Amoy);
        assert_eq!("80002".parse::<Environment>().unwrap(), Environment::Amoy);
        assert!("1".parse::<Environment>().is_err());
        assert!("mars".parse::<Environment>().is_err());
    }

    #[test]
    fn test_for_environment() {
        let config = ClientConfig::for_environment(Environment::Amoy);
        assert_eq!(config.chain_id, POLYGON_AMOY_CHAIN_ID);
        assert_eq!(config.environment().unwrap(), Environment::Amoy);
    }

    #[test]
    fn test_unsupported_chain_rejected() {
        let config = ClientConfig {
            chain_id: 1,
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_base_url_trims_slash() {
        let config = ClientConfig {
            clob_url: "https://clob.example.com/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.base_url(), "https://clob.example.com");
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join(format!("clob-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "url = \"https://clob.example.com\"").unwrap();
        writeln!(file, "chain_id = 80002").unwrap();
        drop(file);

        let config = ClientConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.chain_id, POLYGON_AMOY_CHAIN_ID);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }
}
