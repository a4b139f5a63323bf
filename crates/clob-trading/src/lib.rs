//! CLOB Trading
//!
//! Order placement, batch submission, API-key flows and cancellation for the
//! Polymarket CLOB.

pub mod executor;
pub mod transport;
pub mod types;

pub use executor::OrderExecutor;
pub use transport::{HttpRequest, HttpResponse, OrderBookProvider, ReqwestTransport, Transport};
pub use types::{CancelResponse, OrderResponse, PostOrderRequest};
