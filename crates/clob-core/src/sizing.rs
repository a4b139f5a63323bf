//! Order sizing: converts an order request into exact maker/taker amounts.
//!
//! Amounts are expressed in base units (six decimals). Quantities are floored
//! to two decimals, market prices are derived from the book and rounded to
//! three decimals with banker's rounding, and the taker leg is floored again
//! after multiplication.

use alloy_primitives::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::types::{OrderBookSnapshot, OrderSide, OrderType, TimeInForce};
use crate::{Error, Result};

/// Base units per whole token (USDC and outcome tokens have 6 decimals).
pub const BASE_UNIT_SCALE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Decimals kept on quantities.
pub const QUANTITY_DECIMALS: u32 = 2;

/// Decimals kept on market prices.
pub const PRICE_DECIMALS: u32 = 3;

/// Maker and taker amounts in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityResult {
    pub maker_amount: U256,
    pub taker_amount: U256,
}

/// Round `value` down to `decimals` places.
pub fn floor_dp(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::ToNegativeInfinity)
}

/// Compute maker/taker amounts for an order.
///
/// Limit orders must carry a price. Market orders are priced from `book`,
/// which the caller fetches; this function performs no I/O.
pub fn compute_amounts(
    side: OrderSide,
    order_type: OrderType,
    quantity: Decimal,
    price: Option<Decimal>,
    time_in_force: Option<TimeInForce>,
    book: Option<&OrderBookSnapshot>,
) -> Result<QuantityResult> {
    if quantity <= Decimal::ZERO {
        return Err(Error::invalid_order(format!(
            "Quantity must be positive, got {}",
            quantity
        )));
    }

    let price = match order_type {
        OrderType::Limit => {
            price.ok_or_else(|| Error::invalid_order("Price is required for limit orders"))?
        }
        OrderType::Market => {
            let book = book.ok_or_else(|| {
                Error::invalid_order("An order book snapshot is required for market orders")
            })?;
            market_price(side, quantity, time_in_force, book)?.round_dp(PRICE_DECIMALS)
        }
    };

    if price <= Decimal::ZERO {
        return Err(Error::invalid_order(format!(
            "Price must be positive, got {}",
            price
        )));
    }

    let size = floor_dp(quantity, QUANTITY_DECIMALS);
    if size.is_zero() {
        return Err(Error::invalid_order(format!(
            "Quantity {} rounds down to zero",
            quantity
        )));
    }

    let notional = size
        .checked_mul(price)
        .ok_or_else(|| Error::invalid_order("Order notional overflows"))?;

    // BUY: maker pays quote, receives shares. SELL: maker gives shares.
    let (maker, taker) = match side {
        OrderSide::Buy => (notional, size),
        OrderSide::Sell => (size, notional),
    };
    let taker = floor_dp(taker, QUANTITY_DECIMALS);

    let result = QuantityResult {
        maker_amount: to_base_units(maker)?,
        taker_amount: to_base_units(taker)?,
    };

    debug!(
        side = %side,
        price = %price,
        maker_amount = %result.maker_amount,
        taker_amount = %result.taker_amount,
        "Computed order amounts"
    );

    Ok(result)
}

/// Walk the counter side of the book from its last level toward its first
/// until the accumulated depth covers `quantity`.
///
/// Buys accumulate ask notional (`size * price`), sells accumulate bid size.
/// When the depth never covers the request the first level is used, unless
/// the order is fill-or-kill.
pub fn market_price(
    side: OrderSide,
    quantity: Decimal,
    time_in_force: Option<TimeInForce>,
    book: &OrderBookSnapshot,
) -> Result<Decimal> {
    let (levels, side_name) = match side {
        OrderSide::Buy => (&book.asks, "ask"),
        OrderSide::Sell => (&book.bids, "bid"),
    };

    let mut depth = Decimal::ZERO;
    for level in levels.iter().rev() {
        depth += match side {
            OrderSide::Buy => level.notional(),
            OrderSide::Sell => level.size,
        };
        if depth >= quantity {
            return Ok(level.price);
        }
    }

    if time_in_force == Some(TimeInForce::Fok) {
        return Err(Error::CannotFill {
            message: format!(
                "FOK {} for {} exceeds visible {} depth {}",
                side, quantity, side_name, depth
            ),
        });
    }

    levels
        .first()
        .map(|level| level.price)
        .ok_or(Error::EmptyBook { side: side_name })
}

/// Scale to base units; the result must be a whole number.
fn to_base_units(amount: Decimal) -> Result<U256> {
    let scaled = amount
        .checked_mul(BASE_UNIT_SCALE)
        .ok_or_else(|| Error::invalid_order("Amount overflows base units"))?
        .normalize();

    if !scaled.fract().is_zero() {
        return Err(Error::invalid_order(format!(
            "Amount {} has more precision than base units allow",
            amount
        )));
    }

    scaled
        .to_u128()
        .map(U256::from)
        .ok_or_else(|| Error::invalid_order(format!("Amount {} is out of range", amount)))
}
