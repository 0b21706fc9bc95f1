//! Point-in-time views of an order book
//!
//! Snapshots are built while the market's lock is held, so a snapshot is
//! never torn by a concurrent mutation. They are plain serializable values.

use serde::{Deserialize, Serialize};
use types::ids::{MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use crate::book::Limit;

/// Both sides of one market, best price first on each side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub market: MarketId,
    /// Ascending price
    pub asks: Vec<LevelSnapshot>,
    /// Descending price
    pub bids: Vec<LevelSnapshot>,
    pub ask_total_volume: Quantity,
    pub bid_total_volume: Quantity,
    /// Last arrival sequence assigned in this market
    pub sequence: u64,
}

/// One price level and the orders resting there, in arrival order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub price: Price,
    pub total_quantity: Quantity,
    pub orders: Vec<OrderSnapshot>,
}

/// A resting order as seen by a reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub remaining_quantity: Quantity,
    pub quantity: Quantity,
    pub sequence: u64,
    pub created_at: i64,
}

impl LevelSnapshot {
    pub fn from_limit(limit: &Limit) -> Self {
        Self {
            price: limit.price(),
            total_quantity: limit.total_quantity(),
            orders: limit
                .orders()
                .map(|order| OrderSnapshot::at(limit.price(), order))
                .collect(),
        }
    }
}

impl OrderSnapshot {
    fn at(price: Price, order: &Order) -> Self {
        Self {
            order_id: order.order_id,
            side: order.side,
            price,
            remaining_quantity: order.remaining_quantity,
            quantity: order.quantity,
            sequence: order.sequence,
            created_at: order.created_at,
        }
    }
}

impl BookSnapshot {
    pub fn best_bid(&self) -> Option<&LevelSnapshot> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&LevelSnapshot> {
        self.asks.first()
    }

    /// Whether the best bid is at or above the best ask
    ///
    /// Possible because limit orders rest without matching on entry.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => crate::matching::prices_overlap(bid.price, ask.price),
            _ => false,
        }
    }
}
