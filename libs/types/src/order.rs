//! Order lifecycle types
//!
//! An order moves `Open -> PartiallyFilled -> Filled`, or to `Cancelled`
//! from either non-terminal state. Terminal orders are no longer in any book.

use crate::errors::ValidationError;
use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => write!(f, "BUY"),
            Side::SELL => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    /// Accepts `buy`/`bid` and `sell`/`ask`, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" | "bid" => Ok(Side::BUY),
            "sell" | "ask" => Ok(Side::SELL),
            _ => Err(ValidationError::UnknownSide(s.to_string())),
        }
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted, nothing filled yet
    Open,
    /// Some size filled, remainder still resting
    PartiallyFilled,
    /// Completely matched (terminal)
    Filled,
    /// Removed by cancellation (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

/// A single buy or sell request with a mutable remaining size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    /// Price of the Limit this order rests in. `None` for a market order,
    /// which never rests.
    pub limit_price: Option<Price>,
    /// Original size
    pub quantity: Quantity,
    pub remaining_quantity: Quantity,
    /// Per-market arrival number, strictly increasing
    pub sequence: u64,
    pub status: OrderStatus,
    pub created_at: i64, // Unix nanos
}

impl Order {
    /// Create a limit order that will rest at `price`
    pub fn limit(side: Side, price: Price, quantity: Quantity, sequence: u64, timestamp: i64) -> Self {
        Self::build(side, Some(price), quantity, sequence, timestamp)
    }

    /// Create a market order; it only ever acts as an aggressor
    pub fn market(side: Side, quantity: Quantity, sequence: u64, timestamp: i64) -> Self {
        Self::build(side, None, quantity, sequence, timestamp)
    }

    fn build(
        side: Side,
        limit_price: Option<Price>,
        quantity: Quantity,
        sequence: u64,
        timestamp: i64,
    ) -> Self {
        Self {
            order_id: OrderId::new(),
            side,
            limit_price,
            quantity,
            remaining_quantity: quantity,
            sequence,
            status: OrderStatus::Open,
            created_at: timestamp,
        }
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.quantity.saturating_sub(self.remaining_quantity)
    }

    /// Check if order is completely filled
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    /// Reduce the remaining size by a matched amount and adjust status
    ///
    /// # Panics
    /// Panics if the fill would exceed the remaining size
    pub fn fill(&mut self, fill_quantity: Quantity) {
        assert!(
            fill_quantity <= self.remaining_quantity,
            "Fill would exceed order quantity"
        );

        self.remaining_quantity = self.remaining_quantity.saturating_sub(fill_quantity);
        self.status = if self.is_filled() {
            OrderStatus::Filled
        } else if !self.filled_quantity().is_zero() {
            OrderStatus::PartiallyFilled
        } else {
            self.status
        };
    }

    /// Cancel the order
    ///
    /// # Panics
    /// Panics if order is already in terminal state
    pub fn cancel(&mut self) {
        assert!(!self.status.is_terminal(), "Cannot cancel terminal order");
        self.status = OrderStatus::Cancelled;
    }
}
