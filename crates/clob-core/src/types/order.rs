//! Order request types.

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of the order (buy or sell).
///
/// Serialized as `"BUY"`/`"SELL"` in request bodies but signed as a `uint8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Get the numeric value for signing.
    pub fn as_u8(&self) -> u8 {
        match self {
            OrderSide::Buy => 0,
            OrderSide::Sell => 1,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// How the order price is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Caller supplies the price.
    Limit,
    /// Price is derived from the order book.
    Market,
}

/// Time in force, sent as the `orderType` of the order body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Good-till-cancelled.
    #[default]
    Gtc,
    /// Good-till-date.
    Gtd,
    /// Fill-or-kill.
    Fok,
    /// Fill-and-kill.
    Fak,
}

/// A human order request, before sizing and signing.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub token_id: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    /// Order size in shares. Market buys compare it against ask notional when pricing.
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub time_in_force: Option<TimeInForce>,
    pub post_only: Option<bool>,
    pub fee_rate_bps: Option<u64>,
    pub taker: Option<Address>,
    /// Used as the order salt when present.
    pub client_order_id: Option<u64>,
    /// Unix seconds; `None` means no expiration.
    pub expiration: Option<u64>,
    pub nonce: Option<u64>,
    /// Route through the negative-risk exchange contract.
    pub neg_risk: bool,
}

impl OrderRequest {
    /// Create a limit order request.
    pub fn limit(
        token_id: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self::new(token_id, side, OrderType::Limit, quantity, Some(price))
    }

    /// Create a market order request priced from the order book.
    pub fn market(token_id: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::new(token_id, side, OrderType::Market, quantity, None)
    }

    fn new(
        token_id: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
        price: Option<Decimal>,
    ) -> Self {
        Self {
            token_id: token_id.into(),
            side,
            order_type,
            quantity,
            price,
            time_in_force: None,
            post_only: None,
            fee_rate_bps: None,
            taker: None,
            client_order_id: None,
            expiration: None,
            nonce: None,
            neg_risk: false,
        }
    }

    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    pub fn post_only(mut self, post_only: bool) -> Self {
        self.post_only = Some(post_only);
        self
    }

    pub fn fee_rate_bps(mut self, fee_rate_bps: u64) -> Self {
        self.fee_rate_bps = Some(fee_rate_bps);
        self
    }

    pub fn taker(mut self, taker: Address) -> Self {
        self.taker = Some(taker);
        self
    }

    pub fn client_order_id(mut self, id: u64) -> Self {
        self.client_order_id = Some(id);
        self
    }

    pub fn expires_at(mut self, timestamp: u64) -> Self {
        self.expiration = Some(timestamp);
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn neg_risk(mut self, neg_risk: bool) -> Self {
        self.neg_risk = neg_risk;
        self
    }
}
