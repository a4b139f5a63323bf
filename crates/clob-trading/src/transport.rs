//! HTTP and order-book collaborators.

use async_trait::async_trait;
use clob_auth::{HttpMethod, RequestHeaders};
use clob_core::config::ClientConfig;
use clob_core::types::{OrderBookSnapshot, PriceLevel};
use clob_core::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration as StdDuration;
use tracing::debug;

/// An outgoing request. `body` holds the exact bytes that were signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: RequestHeaders,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends signed requests to the exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Supplies order book snapshots, both sides ascending by price.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderBookProvider: Send + Sync {
    async fn order_book(&self, token_id: &str) -> Result<OrderBookSnapshot>;
}

/// Default transport over `reqwest`. Performs no retries.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(config.request_timeout_secs))
            .connect_timeout(StdDuration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            http_client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    Error::Transport {
        message: err.to_string(),
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http_client.request(method, &url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(transport_error)?;

        debug!(method = %request.method, path = %request.path, status, "Request completed");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ClobOrderBook {
    #[serde(default)]
    bids: Vec<ClobPriceLevel>,
    #[serde(default)]
    asks: Vec<ClobPriceLevel>,
}

#[derive(Debug, Deserialize)]
struct ClobPriceLevel {
    price: String,
    size: String,
}

impl ClobPriceLevel {
    fn parse(&self) -> Result<PriceLevel> {
        let parse = |raw: &str| {
            Decimal::from_str(raw).map_err(|e| Error::Api {
                message: format!("Invalid book level '{}': {}", raw, e),
                status: None,
            })
        };
        Ok(PriceLevel::new(parse(&self.price)?, parse(&self.size)?))
    }
}

/// Parse a `/book` response, sorting both sides ascending by price.
pub fn parse_order_book(body: &str) -> Result<OrderBookSnapshot> {
    let book: ClobOrderBook = serde_json::from_str(body)?;
    let mut bids = book
        .bids
        .iter()
        .map(ClobPriceLevel::parse)
        .collect::<Result<Vec<_>>>()?;
    let mut asks = book
        .asks
        .iter()
        .map(ClobPriceLevel::parse)
        .collect::<Result<Vec<_>>>()?;
    bids.sort_by(|a, b| a.price.cmp(&b.price));
    asks.sort_by(|a, b| a.price.cmp(&b.price));
    Ok(OrderBookSnapshot::new(bids, asks))
}

#[async_trait]
impl OrderBookProvider for ReqwestTransport {
    async fn order_book(&self, token_id: &str) -> Result<OrderBookSnapshot> {
        let response = self
            .send(HttpRequest {
                method: HttpMethod::Get,
                path: format!("/book?token_id={}", token_id),
                headers: RequestHeaders::new(),
                body: None,
            })
            .await?;

        if !response.is_success() {
            return Err(Error::Api {
                message: format!(
                    "Failed to fetch order book: {} - {}",
                    response.status, response.body
                ),
                status: Some(response.status),
            });
        }

        parse_order_book(&response.body)
    }
}
