//! Request and response bodies of the trading endpoints.

use clob_core::signing::SignedOrder;
use clob_core::types::TimeInForce;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /order`, and one element of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostOrderRequest {
    pub order: SignedOrder,
    /// API key of the order owner.
    pub owner: String,
    #[serde(rename = "orderType")]
    pub order_type: TimeInForce,
    /// Omitted when not set.
    #[serde(rename = "postOnly", skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
}

/// Response to an order submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "errorMsg", default)]
    pub error_msg: Option<String>,
    #[serde(rename = "orderID", default)]
    pub order_id: String,
    /// e.g. "matched", "live", "delayed", "unmatched".
    #[serde(default)]
    pub status: String,
    #[serde(rename = "transactionsHashes", default)]
    pub transaction_hashes: Vec<String>,
    #[serde(rename = "makingAmount", default)]
    pub making_amount: Option<String>,
    #[serde(rename = "takingAmount", default)]
    pub taking_amount: Option<String>,
}

impl OrderResponse {
    /// The exchange error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error_msg.as_deref().filter(|msg| !msg.is_empty())
    }

    pub fn is_filled(&self) -> bool {
        let s = self.status.to_lowercase();
        s == "matched" || s == "live" || s == "delayed"
    }
}

/// Body of `DELETE /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelOrderRequest<'a> {
    #[serde(rename = "orderID")]
    pub order_id: &'a str,
}

/// Body of `DELETE /cancel-market-orders`. Unset filters are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelMarketOrdersRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<&'a str>,
}

/// Response to any cancel endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelResponse {
    #[serde(default)]
    pub canceled: Vec<String>,
    /// Order id to reason.
    #[serde(default)]
    pub not_canceled: HashMap<String, String>,
}
