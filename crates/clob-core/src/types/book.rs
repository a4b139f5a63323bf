//! Order book snapshots consumed by the sizing engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single price level in the order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub size: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }

    /// Quote-denominated value of the level.
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}

/// Order book snapshot for one outcome token.
///
/// Both sides are sorted ascending by price, so the best bid is the last
/// level and the best ask is the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl OrderBookSnapshot {
    pub fn new(bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self { bids, asks }
    }

    /// Returns the best bid price (highest buy order).
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.last().map(|l| l.price)
    }

    /// Returns the best ask price (lowest sell order).
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    /// Total quote value resting on the ask side.
    pub fn ask_notional(&self) -> Decimal {
        self.asks.iter().map(PriceLevel::notional).sum()
    }

    /// Total size resting on the bid side.
    pub fn bid_depth(&self) -> Decimal {
        self.bids.iter().map(|l| l.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> OrderBookSnapshot {
        OrderBookSnapshot::new(
            vec![
                PriceLevel::new(Decimal::new(40, 2), Decimal::from(10)),
                PriceLevel::new(Decimal::new(45, 2), Decimal::from(20)),
            ],
            vec![
                PriceLevel::new(Decimal::new(50, 2), Decimal::from(10)),
                PriceLevel::new(Decimal::new(60, 2), Decimal::from(5)),
            ],
        )
    }

    #[test]
    fn test_best_prices_follow_ascending_order() {
        let book = book();
        assert_eq!(book.best_bid(), Some(Decimal::new(45, 2)));
        assert_eq!(book.best_ask(), Some(Decimal::new(50, 2)));
    }

    #[test]
    fn test_depth() {
        let book = book();
        assert_eq!(book.ask_notional(), Decimal::from(8));
        assert_eq!(book.bid_depth(), Decimal::from(30));
        assert_eq!(OrderBookSnapshot::default().best_ask(), None);
    }
}
