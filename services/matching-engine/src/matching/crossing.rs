//! Price overlap checks
//!
//! Limit orders rest without matching on entry, so a book can end up with
//! its best bid at or above its best ask. These helpers only detect that
//! state; they never cause a fill.

use types::numeric::Price;
use types::order::Side;

/// True when the best bid has reached the best ask
pub fn prices_overlap(best_bid: Price, best_ask: Price) -> bool {
    best_bid >= best_ask
}

/// True when a new `side` order at `price` is priced at or through the
/// opposite side's best price
pub fn rests_through(side: Side, price: Price, opposite_best: Price) -> bool {
    match side {
        Side::BUY => prices_overlap(price, opposite_best),
        Side::SELL => prices_overlap(opposite_best, price),
    }
}
