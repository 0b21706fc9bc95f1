//! Match records
//!
//! A `Match` is the unit of output of the matching engine. It is a plain
//! value; the execution price is always the resting (maker) order's price.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One fill between a resting maker and an incoming taker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    /// Side of the aggressor
    pub taker_side: Side,
    pub quantity: Quantity,
    pub price: Price,
}

impl Match {
    /// Build a match from the maker's and taker's perspective
    pub fn new(
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        taker_side: Side,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        let (buy_order_id, sell_order_id) = match taker_side {
            Side::BUY => (taker_order_id, maker_order_id),
            Side::SELL => (maker_order_id, taker_order_id),
        };
        Self {
            buy_order_id,
            sell_order_id,
            maker_order_id,
            taker_order_id,
            taker_side,
            quantity,
            price,
        }
    }

    /// Price × quantity
    pub fn notional(&self) -> Decimal {
        self.quantity.as_decimal() * self.price.as_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_taker_sides() {
        let maker = OrderId::new();
        let taker = OrderId::new();
        let m = Match::new(maker, taker, Side::BUY, Quantity::from_u64(15), Price::from_u64(100));

        assert_eq!(m.buy_order_id, taker);
        assert_eq!(m.sell_order_id, maker);
    }

    #[test]
    fn test_sell_taker_sides() {
        let maker = OrderId::new();
        let taker = OrderId::new();
        let m = Match::new(maker, taker, Side::SELL, Quantity::from_u64(5), Price::from_u64(100));

        assert_eq!(m.buy_order_id, maker);
        assert_eq!(m.sell_order_id, taker);
    }

    #[test]
    fn test_notional() {
        let m = Match::new(
            OrderId::new(),
            OrderId::new(),
            Side::BUY,
            Quantity::from_str("0.5").unwrap(),
            Price::from_u64(50000),
        );
        assert_eq!(m.notional(), Decimal::from(25000));
    }
}
