//! Order execution against the CLOB: sizing, signing and submission.

use crate::transport::{HttpRequest, HttpResponse, OrderBookProvider, ReqwestTransport, Transport};
use crate::types::{
    CancelMarketOrdersRequest, CancelOrderRequest, CancelResponse, OrderResponse, PostOrderRequest,
};
use clob_auth::{
    sign_request, ApiCredentials, ApiKeyResponse, CredentialStore, Credentials, HttpMethod,
    OrderSigner, CREATE_API_KEY_PATH, DERIVE_API_KEY_PATH,
};
use clob_core::config::ClientConfig;
use clob_core::types::{OrderRequest, OrderType};
use clob_core::{compute_amounts, Error, Result};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Places and cancels orders on behalf of one credential store.
///
/// Every operation reads one credential snapshot up front and uses it for
/// all of its signatures, so a concurrent rotation never mixes keys within
/// an operation. Nothing is retried; cancelling means dropping the future.
pub struct OrderExecutor {
    transport: Arc<dyn Transport>,
    books: Arc<dyn OrderBookProvider>,
    credentials: CredentialStore,
    signer: OrderSigner,
}

impl OrderExecutor {
    pub fn new(
        transport: Arc<dyn Transport>,
        books: Arc<dyn OrderBookProvider>,
        credentials: CredentialStore,
        chain_id: u64,
    ) -> Result<Self> {
        Ok(Self {
            transport,
            books,
            credentials,
            signer: OrderSigner::new(chain_id)?,
        })
    }

    /// Executor over the default `reqwest` transport.
    pub fn from_config(config: &ClientConfig, credentials: CredentialStore) -> Result<Self> {
        config.validate()?;
        let transport = Arc::new(ReqwestTransport::new(config)?);
        Self::new(transport.clone(), transport, credentials, config.chain_id)
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn chain_id(&self) -> u64 {
        self.signer.chain_id()
    }

    /// Size, sign and submit one order via `POST /order`.
    pub async fn place_order(&self, request: &OrderRequest) -> Result<OrderResponse> {
        let credentials = self.credentials.snapshot().await;
        let payload = self.prepare_order(&credentials, request).await?;

        let body = serde_json::to_string(&payload)?;
        debug!(body_len = body.len(), token_id = %request.token_id, "Posting order");

        let response = self
            .send_signed(&credentials, HttpMethod::Post, "/order", Some(body), None)
            .await?;
        let result: OrderResponse = parse_body(&response)?;
        let result = order_result(result, response.status)?;

        info!(
            order_id = %result.order_id,
            status = %result.status,
            side = %request.side,
            "Order placed"
        );
        Ok(result)
    }

    /// Prepare every order independently and submit the prepared ones in a
    /// single `POST /orders`.
    ///
    /// Results line up with `requests`. Fails with
    /// [`Error::AllOrdersFailed`] only when no order succeeded.
    pub async fn place_orders(&self, requests: &[OrderRequest]) -> Result<Vec<Result<OrderResponse>>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let credentials = self.credentials.snapshot().await;
        let mut results: Vec<Result<OrderResponse>> = Vec::with_capacity(requests.len());
        let mut pending = Vec::new();
        let mut payloads = Vec::new();

        for request in requests {
            match self.prepare_order(&credentials, request).await {
                Ok(payload) => {
                    pending.push(results.len());
                    payloads.push(payload);
                    results.push(Err(Error::Api {
                        message: "No response for order".to_string(),
                        status: None,
                    }));
                }
                Err(e) => {
                    warn!(token_id = %request.token_id, error = %e, "Order preparation failed");
                    results.push(Err(e));
                }
            }
        }

        if !payloads.is_empty() {
            let body = serde_json::to_string(&payloads)?;
            debug!(orders = payloads.len(), body_len = body.len(), "Posting order batch");

            let sent = match self
                .send_signed(&credentials, HttpMethod::Post, "/orders", Some(body), None)
                .await
            {
                Ok(response) => parse_body::<Vec<OrderResponse>>(&response)
                    .map(|responses| (response.status, responses)),
                Err(e) => Err(e),
            };

            match sent {
                Ok((status, responses)) => {
                    for (position, result) in pending.into_iter().zip(responses) {
                        results[position] = order_result(result, status);
                    }
                }
                Err(e) => {
                    warn!(orders = pending.len(), error = %e, "Order batch submission failed");
                    for position in pending {
                        results[position] = Err(batch_failure(&e));
                    }
                }
            }
        }

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed == results.len() {
            return Err(Error::AllOrdersFailed {
                failures: results.into_iter().filter_map(|r| r.err()).collect(),
            });
        }
        if failed > 0 {
            warn!(failed, total = results.len(), "Some orders in batch failed");
        }

        info!(placed = results.len() - failed, "Order batch placed");
        Ok(results)
    }

    /// Create new L2 credentials (`POST /auth/api-key`) and install them.
    pub async fn create_api_key(&self, nonce: Option<u64>) -> Result<ApiCredentials> {
        let api = self
            .request_api_key(HttpMethod::Post, CREATE_API_KEY_PATH, nonce)
            .await?;
        info!(api_key = %api.api_key, "Created API credentials");
        Ok(api)
    }

    /// Derive existing L2 credentials (`GET /auth/derive-api-key`) and install them.
    pub async fn derive_api_key(&self, nonce: Option<u64>) -> Result<ApiCredentials> {
        let api = self
            .request_api_key(HttpMethod::Get, DERIVE_API_KEY_PATH, nonce)
            .await?;
        info!(api_key = %api.api_key, "Derived API credentials");
        Ok(api)
    }

    /// Tries create first, then derive.
    pub async fn create_or_derive_api_key(&self, nonce: Option<u64>) -> Result<ApiCredentials> {
        match self.create_api_key(nonce).await {
            Ok(api) => Ok(api),
            Err(create_err) => {
                warn!(error = %create_err, "create_api_key failed, trying derive");
                self.derive_api_key(nonce).await
            }
        }
    }

    /// `DELETE /order` with `{"orderID": ...}`.
    pub async fn cancel_order(&self, order_id: &str) -> Result<CancelResponse> {
        let body = serde_json::to_string(&CancelOrderRequest { order_id })?;
        self.cancel("/order", Some(body)).await
    }

    /// `DELETE /orders` with an array of order ids.
    pub async fn cancel_orders(&self, order_ids: &[String]) -> Result<CancelResponse> {
        let body = serde_json::to_string(order_ids)?;
        self.cancel("/orders", Some(body)).await
    }

    /// `DELETE /cancel-market-orders`, filtered by market and/or token.
    pub async fn cancel_market_orders(
        &self,
        market: Option<&str>,
        asset_id: Option<&str>,
    ) -> Result<CancelResponse> {
        let body = serde_json::to_string(&CancelMarketOrdersRequest { market, asset_id })?;
        self.cancel("/cancel-market-orders", Some(body)).await
    }

    /// `DELETE /cancel-all`.
    pub async fn cancel_all(&self) -> Result<CancelResponse> {
        self.cancel("/cancel-all", None).await
    }

    async fn cancel(&self, path: &str, body: Option<String>) -> Result<CancelResponse> {
        let credentials = self.credentials.snapshot().await;
        let response = self
            .send_signed(&credentials, HttpMethod::Delete, path, body, None)
            .await?;
        let result: CancelResponse = parse_body(&response)?;

        info!(
            path = %path,
            canceled = result.canceled.len(),
            not_canceled = result.not_canceled.len(),
            "Cancel request completed"
        );
        Ok(result)
    }

    async fn request_api_key(
        &self,
        method: HttpMethod,
        path: &str,
        nonce: Option<u64>,
    ) -> Result<ApiCredentials> {
        let credentials = self.credentials.snapshot().await;
        let response = self
            .send_signed(&credentials, method, path, None, nonce)
            .await?;
        let key: ApiKeyResponse = parse_body(&response)?;
        let api = ApiCredentials::try_from(key)?;

        self.credentials.install_api_credentials(api.clone()).await;
        Ok(api)
    }

    /// Build the submission payload for one order.
    ///
    /// Caller-contract checks run before the book fetch; the book is fetched
    /// only for market orders.
    async fn prepare_order(
        &self,
        credentials: &Credentials,
        request: &OrderRequest,
    ) -> Result<PostOrderRequest> {
        let api = credentials.require_api_credentials()?;
        check_request(request)?;

        let book = match request.order_type {
            OrderType::Market => Some(self.books.order_book(&request.token_id).await?),
            OrderType::Limit => None,
        };

        let amounts = compute_amounts(
            request.side,
            request.order_type,
            request.quantity,
            request.price,
            request.time_in_force,
            book.as_ref(),
        )?;
        let order = self.signer.sign_request(credentials, request, amounts)?;

        Ok(PostOrderRequest {
            order,
            owner: api.api_key.clone(),
            order_type: request.time_in_force.unwrap_or_default(),
            post_only: request.post_only,
        })
    }

    /// Sign with the tier the endpoint needs and send. `body` is signed and
    /// sent as the same string.
    async fn send_signed(
        &self,
        credentials: &Credentials,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        nonce: Option<u64>,
    ) -> Result<HttpResponse> {
        let headers = sign_request(credentials, method, path, body.as_deref(), nonce)?;
        let response = self
            .transport
            .send(HttpRequest {
                method,
                path: path.to_string(),
                headers,
                body,
            })
            .await?;

        if !response.is_success() {
            return Err(Error::Api {
                message: format!(
                    "{} {} failed: {} - {}",
                    method, path, response.status, response.body
                ),
                status: Some(response.status),
            });
        }
        Ok(response)
    }
}

impl std::fmt::Debug for OrderExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderExecutor")
            .field("chain_id", &self.signer.chain_id())
            .finish_non_exhaustive()
    }
}

fn check_request(request: &OrderRequest) -> Result<()> {
    if request.quantity <= Decimal::ZERO {
        return Err(Error::invalid_order(format!(
            "Quantity must be positive, got {}",
            request.quantity
        )));
    }
    if request.order_type == OrderType::Limit && request.price.is_none() {
        return Err(Error::invalid_order("Price is required for limit orders"));
    }
    Ok(())
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    Ok(serde_json::from_str(&response.body)?)
}

/// Per-order copy of an error that failed the whole batch request.
fn batch_failure(err: &Error) -> Error {
    match err {
        Error::Transport { message } => Error::Transport {
            message: message.clone(),
        },
        Error::Api { message, status } => Error::Api {
            message: message.clone(),
            status: *status,
        },
        other => Error::Api {
            message: other.to_string(),
            status: None,
        },
    }
}

fn order_result(response: OrderResponse, status: u16) -> Result<OrderResponse> {
    match response.error() {
        Some(message) => Err(Error::Api {
            message: message.to_string(),
            status: Some(status),
        }),
        None => Ok(response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockOrderBookProvider, MockTransport};
    use clob_auth::headers::{POLY_API_KEY, POLY_NONCE, POLY_SIGNATURE, POLY_TIMESTAMP};
    use clob_core::signing::POLYGON_CHAIN_ID;
    use clob_core::types::{OrderBookSnapshot, OrderSide, PriceLevel, TimeInForce};
    use std::str::FromStr;

    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TOKEN_ID: &str = "1234";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn api() -> ApiCredentials {
        ApiCredentials::new("api-key", "c2VjcmV0", "pass").unwrap()
    }

    fn store(with_api: bool) -> CredentialStore {
        let creds = Credentials::new(TEST_PRIVATE_KEY).unwrap();
        let creds = if with_api {
            creds.with_api_credentials(api())
        } else {
            creds
        };
        CredentialStore::new(creds)
    }

    fn ok(body: &str) -> Result<HttpResponse> {
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn executor(
        transport: MockTransport,
        books: MockOrderBookProvider,
        store: CredentialStore,
    ) -> OrderExecutor {
        OrderExecutor::new(Arc::new(transport), Arc::new(books), store, POLYGON_CHAIN_ID).unwrap()
    }

    fn no_books() -> MockOrderBookProvider {
        let mut books = MockOrderBookProvider::new();
        books.expect_order_book().times(0);
        books
    }

    fn book() -> OrderBookSnapshot {
        OrderBookSnapshot::new(
            vec![PriceLevel::new(dec("0.40"), dec("100"))],
            vec![
                PriceLevel::new(dec("0.50"), dec("10")),
                PriceLevel::new(dec("0.60"), dec("10")),
            ],
        )
    }

    #[tokio::test]
    async fn test_place_limit_order_signs_exact_body() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|request| {
            assert_eq!(request.method, HttpMethod::Post);
            assert_eq!(request.path, "/order");

            let body = request.body.clone().unwrap();
            let json: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(json["owner"], "api-key");
            assert_eq!(json["orderType"], "GTC");
            assert!(json.get("postOnly").is_none());
            assert_eq!(json["order"]["side"], "BUY");
            assert_eq!(json["order"]["makerAmount"], "5000000");
            assert_eq!(json["order"]["takerAmount"], "10000000");

            let timestamp = request.headers.get(POLY_TIMESTAMP).unwrap();
            let expected = api()
                .sign(&format!("{}POST/order{}", timestamp, body))
                .unwrap();
            assert_eq!(request.headers.get(POLY_SIGNATURE), Some(expected.as_str()));
            assert_eq!(request.headers.get(POLY_API_KEY), Some("api-key"));

            ok(r#"{"success":true,"errorMsg":"","orderID":"0xorder","status":"live"}"#)
        });

        let executor = executor(transport, no_books(), store(true));
        let request = OrderRequest::limit(TOKEN_ID, OrderSide::Buy, dec("10"), dec("0.5"));
        let response = executor.place_order(&request).await.unwrap();

        assert_eq!(response.order_id, "0xorder");
    }

    #[tokio::test]
    async fn test_market_order_fetches_book_once() {
        let mut books = MockOrderBookProvider::new();
        books
            .expect_order_book()
            .withf(|token_id| token_id == TOKEN_ID)
            .times(1)
            .returning(|_| Ok(book()));

        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|request| {
            let json: serde_json::Value =
                serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
            // walk from the last ask: 0.60 * 10 = 6 >= 5
            assert_eq!(json["order"]["makerAmount"], "3000000");
            assert_eq!(json["order"]["takerAmount"], "5000000");
            assert_eq!(json["orderType"], "FOK");
            ok(r#"{"success":true,"orderID":"0xm","status":"matched"}"#)
        });

        let executor = executor(transport, books, store(true));
        let request = OrderRequest::market(TOKEN_ID, OrderSide::Buy, dec("5"))
            .time_in_force(TimeInForce::Fok);
        let response = executor.place_order(&request).await.unwrap();
        assert!(response.is_filled());
    }

    #[tokio::test]
    async fn test_fok_market_order_cannot_fill() {
        let mut books = MockOrderBookProvider::new();
        books.expect_order_book().times(1).returning(|_| Ok(book()));
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);

        let executor = executor(transport, books, store(true));
        let request = OrderRequest::market(TOKEN_ID, OrderSide::Buy, dec("50"))
            .time_in_force(TimeInForce::Fok);
        let err = executor.place_order(&request).await.unwrap_err();
        assert!(matches!(err, Error::CannotFill { .. }));
    }

    #[tokio::test]
    async fn test_missing_l2_credentials_fail_before_io() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);

        let executor = executor(transport, no_books(), store(false));
        let request = OrderRequest::market(TOKEN_ID, OrderSide::Buy, dec("5"));
        let err = executor.place_order(&request).await.unwrap_err();
        assert!(matches!(err, Error::MissingCredentials { .. }));
    }

    #[tokio::test]
    async fn test_limit_without_price_fails_before_io() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);

        let executor = executor(transport, no_books(), store(true));
        let mut request = OrderRequest::limit(TOKEN_ID, OrderSide::Sell, dec("5"), dec("0.5"));
        request.price = None;
        let err = executor.place_order(&request).await.unwrap_err();
        assert!(matches!(err, Error::InvalidOrder { .. }));
    }

    #[tokio::test]
    async fn test_error_message_in_response_is_api_error() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            ok(r#"{"success":false,"errorMsg":"not enough balance / allowance"}"#)
        });

        let executor = executor(transport, no_books(), store(true));
        let request = OrderRequest::limit(TOKEN_ID, OrderSide::Buy, dec("10"), dec("0.5"));
        match executor.place_order(&request).await {
            Err(Error::Api { message, status }) => {
                assert_eq!(message, "not enough balance / allowance");
                assert_eq!(status, Some(200));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 401,
                headers: Vec::new(),
                body: "Unauthorized".to_string(),
            })
        });

        let executor = executor(transport, no_books(), store(true));
        let err = executor.cancel_all().await.unwrap_err();
        assert!(matches!(err, Error::Api { status: Some(401), .. }));
    }

    #[tokio::test]
    async fn test_batch_keeps_per_order_results() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|request| {
            assert_eq!(request.path, "/orders");
            let json: serde_json::Value =
                serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
            assert_eq!(json.as_array().unwrap().len(), 2);
            assert_eq!(json[1]["postOnly"], true);
            ok(r#"[
                {"success":true,"errorMsg":"","orderID":"0x1","status":"live"},
                {"success":false,"errorMsg":"invalid post-only order","orderID":""}
            ]"#)
        });

        let executor = executor(transport, no_books(), store(true));
        let mut missing_price = OrderRequest::limit(TOKEN_ID, OrderSide::Buy, dec("1"), dec("0.5"));
        missing_price.price = None;
        let requests = vec![
            OrderRequest::limit(TOKEN_ID, OrderSide::Buy, dec("10"), dec("0.5")),
            missing_price,
            OrderRequest::limit(TOKEN_ID, OrderSide::Sell, dec("10"), dec("0.6")).post_only(true),
        ];

        let results = executor.place_orders(&requests).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().order_id, "0x1");
        assert!(matches!(results[1], Err(Error::InvalidOrder { .. })));
        assert!(matches!(results[2], Err(Error::Api { .. })));
    }

    #[tokio::test]
    async fn test_batch_all_failed() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);

        let executor = executor(transport, no_books(), store(true));
        let mut first = OrderRequest::limit(TOKEN_ID, OrderSide::Buy, dec("1"), dec("0.5"));
        first.price = None;
        let second = OrderRequest::limit(TOKEN_ID, OrderSide::Buy, dec("0"), dec("0.5"));

        match executor.place_orders(&[first, second]).await {
            Err(Error::AllOrdersFailed { failures }) => assert_eq!(failures.len(), 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_batch_request_failure_keeps_every_failure() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 500,
                headers: Vec::new(),
                body: "boom".to_string(),
            })
        });

        let executor = executor(transport, no_books(), store(true));
        let mut missing_price = OrderRequest::limit(TOKEN_ID, OrderSide::Buy, dec("1"), dec("0.5"));
        missing_price.price = None;
        let requests = vec![
            missing_price,
            OrderRequest::limit(TOKEN_ID, OrderSide::Buy, dec("10"), dec("0.5")),
        ];

        match executor.place_orders(&requests).await {
            Err(Error::AllOrdersFailed { failures }) => {
                assert_eq!(failures.len(), 2);
                assert!(matches!(failures[0], Error::InvalidOrder { .. }));
                assert!(matches!(failures[1], Error::Api { status: Some(500), .. }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_batch_transport_error_is_per_order() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Err(Error::Transport {
                message: "connection reset".to_string(),
            })
        });

        let executor = executor(transport, no_books(), store(true));
        let requests = vec![
            OrderRequest::limit(TOKEN_ID, OrderSide::Buy, dec("10"), dec("0.5")),
            OrderRequest::limit(TOKEN_ID, OrderSide::Sell, dec("5"), dec("0.6")),
        ];

        match executor.place_orders(&requests).await {
            Err(Error::AllOrdersFailed { failures }) => {
                assert_eq!(failures.len(), 2);
                assert!(failures
                    .iter()
                    .all(|e| matches!(e, Error::Transport { .. })));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_batch_sends_nothing() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);
        let executor = executor(transport, no_books(), store(true));
        assert!(executor.place_orders(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_or_derive_falls_back_and_installs() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(2).returning(|request| {
            assert!(request.headers.get(POLY_API_KEY).is_none());
            assert_eq!(request.headers.get(POLY_NONCE), Some("3"));
            match (request.method, request.path.as_str()) {
                (HttpMethod::Post, CREATE_API_KEY_PATH) => Ok(HttpResponse {
                    status: 400,
                    headers: Vec::new(),
                    body: r#"{"error":"key exists"}"#.to_string(),
                }),
                (HttpMethod::Get, DERIVE_API_KEY_PATH) => {
                    ok(r#"{"apiKey":"derived","secret":"c2VjcmV0","passphrase":"pp"}"#)
                }
                other => panic!("unexpected request {:?}", other),
            }
        });

        let store = store(false);
        let executor = executor(transport, no_books(), store.clone());
        let api = executor.create_or_derive_api_key(Some(3)).await.unwrap();

        assert_eq!(api.api_key, "derived");
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.require_api_credentials().unwrap().api_key, "derived");
    }

    #[tokio::test]
    async fn test_malformed_derived_secret_is_not_installed() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| ok(r#"{"apiKey":"k","secret":"%%%","passphrase":"p"}"#));

        let store = store(false);
        let executor = executor(transport, no_books(), store.clone());
        let err = executor.derive_api_key(None).await.unwrap_err();

        assert!(matches!(err, Error::Config { .. }));
        assert!(!store.snapshot().await.has_api_credentials());
    }

    #[tokio::test]
    async fn test_cancel_order_body() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|request| {
            assert_eq!(request.method, HttpMethod::Delete);
            assert_eq!(request.path, "/order");
            assert_eq!(request.body.as_deref(), Some(r#"{"orderID":"0xabc"}"#));

            let timestamp = request.headers.get(POLY_TIMESTAMP).unwrap();
            let expected = api()
                .sign(&format!("{}DELETE/order{{\"orderID\":\"0xabc\"}}", timestamp))
                .unwrap();
            assert_eq!(request.headers.get(POLY_SIGNATURE), Some(expected.as_str()));
            ok(r#"{"canceled":["0xabc"],"not_canceled":{}}"#)
        });

        let executor = executor(transport, no_books(), store(true));
        let response = executor.cancel_order("0xabc").await.unwrap();
        assert_eq!(response.canceled, vec!["0xabc".to_string()]);
    }

    #[tokio::test]
    async fn test_cancel_orders_and_all() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(2).returning(|request| {
            match request.path.as_str() {
                "/orders" => assert_eq!(request.body.as_deref(), Some(r#"["0x1","0x2"]"#)),
                "/cancel-all" => assert!(request.body.is_none()),
                other => panic!("unexpected path {}", other),
            }
            ok(r#"{"canceled":[],"not_canceled":{}}"#)
        });

        let executor = executor(transport, no_books(), store(true));
        executor
            .cancel_orders(&["0x1".to_string(), "0x2".to_string()])
            .await
            .unwrap();
        executor.cancel_all().await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_market_orders_body() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(2).returning(|request| {
            assert_eq!(request.method, HttpMethod::Delete);
            assert_eq!(request.path, "/cancel-market-orders");
            let body = request.body.clone().unwrap();
            assert!(
                body == r#"{"market":"0xcond","asset_id":"1234"}"#
                    || body == r#"{"asset_id":"1234"}"#
            );

            let timestamp = request.headers.get(POLY_TIMESTAMP).unwrap();
            let expected = api()
                .sign(&format!("{}DELETE/cancel-market-orders{}", timestamp, body))
                .unwrap();
            assert_eq!(request.headers.get(POLY_SIGNATURE), Some(expected.as_str()));
            ok(r#"{"canceled":["0x1"],"not_canceled":{}}"#)
        });

        let executor = executor(transport, no_books(), store(true));
        let response = executor
            .cancel_market_orders(Some("0xcond"), Some(TOKEN_ID))
            .await
            .unwrap();
        assert_eq!(response.canceled, vec!["0x1".to_string()]);
        executor.cancel_market_orders(None, Some(TOKEN_ID)).await.unwrap();
    }

    #[tokio::test]
    async fn test_unsupported_chain() {
        let result = OrderExecutor::new(
            Arc::new(MockTransport::new()),
            Arc::new(MockOrderBookProvider::new()),
            store(true),
            1,
        );
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
