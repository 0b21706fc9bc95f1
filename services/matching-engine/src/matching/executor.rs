//! Fill execution
//!
//! Crosses one resting maker with the incoming taker and records the result.

use types::execution::Match;
use types::numeric::Price;
use types::order::Order;

/// Cross `maker` and `taker` at the maker's level price
///
/// The crossed size is the smaller of the two remaining sizes; both orders
/// are reduced by it. The caller guarantees the orders are on opposite sides.
pub fn execute_fill(maker: &mut Order, taker: &mut Order, price: Price) -> Match {
    debug_assert_ne!(maker.side, taker.side, "maker and taker on the same side");

    let crossed = maker.remaining_quantity.min(taker.remaining_quantity);
    maker.fill(crossed);
    taker.fill(crossed);

    Match::new(maker.order_id, taker.order_id, taker.side, crossed, price)
}
