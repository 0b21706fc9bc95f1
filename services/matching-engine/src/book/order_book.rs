//! Order book for a single market
//!
//! Owns both sides and a global index from order id to the (side, price) of
//! the level the order rests in. The index holds keys only; ownership runs
//! strictly book -> level -> order.

use std::collections::HashMap;
use tracing::{debug, warn};
use types::errors::{EngineError, ValidationError};
use types::execution::Match;
use types::ids::{MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::side::BookSide;
use crate::matching::crossing;
use crate::snapshot::{BookSnapshot, LevelSnapshot};

/// Bid and ask liquidity for one market
#[derive(Debug, Clone)]
pub struct OrderBook {
    market: MarketId,
    bids: BookSide,
    asks: BookSide,
    /// Every resting order, keyed by id
    index: HashMap<OrderId, (Side, Price)>,
    /// Last arrival number handed out
    sequence: u64,
}

impl OrderBook {
    pub fn new(market: MarketId) -> Self {
        Self {
            market,
            bids: BookSide::new(Side::BUY),
            asks: BookSide::new(Side::SELL),
            index: HashMap::new(),
            sequence: 0,
        }
    }

    pub fn market(&self) -> &MarketId {
        &self.market
    }

    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::BUY => &self.bids,
            Side::SELL => &self.asks,
        }
    }

    /// Rest a limit order at `price`
    ///
    /// The order is never matched on entry, even when it is priced through
    /// the opposite best. Only market orders take liquidity.
    pub fn place_limit_order(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: i64,
    ) -> Result<OrderId, EngineError> {
        ensure_positive(quantity)?;
        if self.side(side).total_volume().checked_add(quantity).is_none() {
            return Err(ValidationError::InvalidQuantity(format!(
                "{side} side volume overflow adding {quantity}"
            ))
            .into());
        }

        if let Some(opposite_best) = self.side(side.opposite()).best_price() {
            if crossing::rests_through(side, price, opposite_best) {
                debug!(
                    market = %self.market,
                    %side,
                    %price,
                    %opposite_best,
                    "Limit order rests through the opposite best price"
                );
            }
        }

        let sequence = self.next_sequence();
        let order = Order::limit(side, price, quantity, sequence, timestamp);
        let order_id = order.order_id;

        match side {
            Side::BUY => self.bids.insert(price, order),
            Side::SELL => self.asks.insert(price, order),
        }
        self.index.insert(order_id, (side, price));

        debug!(
            market = %self.market,
            %order_id,
            %side,
            %price,
            %quantity,
            sequence,
            "Limit order placed"
        );
        Ok(order_id)
    }

    /// Execute a market order against the opposite side
    ///
    /// Fails without touching the book when the opposite side holds less
    /// than `quantity`. Otherwise the order is filled completely, best price
    /// first and oldest order first within a price. It never rests.
    pub fn place_market_order(
        &mut self,
        side: Side,
        quantity: Quantity,
        timestamp: i64,
    ) -> Result<Vec<Match>, EngineError> {
        ensure_positive(quantity)?;

        let available = self.side(side.opposite()).total_volume();
        if quantity > available {
            warn!(
                market = %self.market,
                %side,
                requested = %quantity,
                %available,
                "Market order rejected: insufficient liquidity"
            );
            return Err(EngineError::InsufficientLiquidity {
                requested: quantity.to_string(),
                available: available.to_string(),
            });
        }

        let sequence = self.next_sequence();
        let mut taker = Order::market(side, quantity, sequence, timestamp);
        let opposite = match side {
            Side::BUY => &mut self.asks,
            Side::SELL => &mut self.bids,
        };

        let mut matches = Vec::new();
        while !taker.is_filled() {
            let Some((price, report)) = opposite.fill_best(&mut taker) else {
                break;
            };
            for maker in &report.filled {
                self.index.remove(&maker.order_id);
            }
            if opposite.level(price).is_none() {
                debug!(market = %self.market, %price, side = %opposite.side(), "Price level cleared");
            }
            matches.extend(report.matches);
        }

        debug_assert!(taker.is_filled(), "liquidity check guarantees a complete fill");
        debug!(
            market = %self.market,
            taker_order_id = %taker.order_id,
            %side,
            %quantity,
            fills = matches.len(),
            "Market order executed"
        );
        Ok(matches)
    }

    /// Remove a resting order from the book
    ///
    /// Returns the cancelled order with whatever size it still had.
    pub fn cancel_order(&mut self, order_id: &OrderId) -> Result<Order, EngineError> {
        let not_found = || EngineError::OrderNotFound {
            order_id: order_id.to_string(),
        };

        let (side, price) = *self.index.get(order_id).ok_or_else(not_found)?;
        let removed = match side {
            Side::BUY => self.bids.remove(order_id, price),
            Side::SELL => self.asks.remove(order_id, price),
        };
        self.index.remove(order_id);

        let mut order = removed.ok_or_else(not_found)?;
        order.cancel();

        debug!(
            market = %self.market,
            %order_id,
            %side,
            %price,
            remaining = %order.remaining_quantity,
            "Order cancelled"
        );
        Ok(order)
    }

    /// Look up a resting order
    pub fn get_order(&self, order_id: &OrderId) -> Option<&Order> {
        let (side, price) = self.index.get(order_id)?;
        self.side(*side).level(*price)?.get(order_id)
    }

    pub fn ask_total_volume(&self) -> Quantity {
        self.asks.total_volume()
    }

    pub fn bid_total_volume(&self) -> Quantity {
        self.bids.total_volume()
    }

    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.best()
    }

    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.best()
    }

    /// Top `levels` price levels per side as (bids, asks), best first
    pub fn depth(&self, levels: usize) -> (Vec<(Price, Quantity)>, Vec<(Price, Quantity)>) {
        (self.bids.depth_snapshot(levels), self.asks.depth_snapshot(levels))
    }

    /// Full view of both sides, every level and every resting order
    pub fn snapshot(&self) -> BookSnapshot {
        let levels = |side: &BookSide| -> Vec<LevelSnapshot> {
            side.levels().map(LevelSnapshot::from_limit).collect()
        };

        BookSnapshot {
            market: self.market.clone(),
            asks: levels(&self.asks),
            bids: levels(&self.bids),
            ask_total_volume: self.asks.total_volume(),
            bid_total_volume: self.bids.total_volume(),
            sequence: self.sequence,
        }
    }

    /// Number of resting orders across both sides
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn ensure_positive(quantity: Quantity) -> Result<(), ValidationError> {
    if quantity.is_zero() {
        return Err(ValidationError::InvalidQuantity(
            "quantity must be positive".to_string(),
        ));
    }
    Ok(())
}
