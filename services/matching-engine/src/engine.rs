//! Matching engine core
//!
//! The registry of markets and the entry points the request layer calls.
//! Built once from an `EngineConfig`; the set of markets never changes
//! afterwards, so looking a market up needs no lock. Each market's book sits
//! behind its own `RwLock`: mutations are serialized per market while
//! independent markets run fully in parallel.

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::info;
use types::errors::EngineError;
use types::execution::Match;
use types::ids::{MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use crate::book::OrderBook;
use crate::config::{ConfigError, EngineConfig, MarketConfig};
use crate::snapshot::BookSnapshot;

/// A registered market: its settings and its book
struct Market {
    config: MarketConfig,
    book: RwLock<OrderBook>,
}

/// Main matching engine
pub struct MatchingEngine {
    markets: HashMap<MarketId, Market>,
}

impl MatchingEngine {
    /// Create an engine with one empty book per configured market
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let markets = config
            .markets
            .into_iter()
            .map(|market| {
                info!(
                    market = %market.symbol,
                    price_scale = market.price_scale,
                    quantity_scale = market.quantity_scale,
                    "Market registered"
                );
                let book = RwLock::new(OrderBook::new(market.symbol.clone()));
                (market.symbol.clone(), Market { config: market, book })
            })
            .collect();

        Ok(Self { markets })
    }

    fn market(&self, market: &str) -> Result<&Market, EngineError> {
        self.markets.get(market).ok_or_else(|| EngineError::MarketNotFound {
            market: market.to_string(),
        })
    }

    /// Rest a limit order; returns its id
    pub fn place_limit_order(
        &self,
        market: &str,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<OrderId, EngineError> {
        let market = self.market(market)?;
        market.config.check_price(price)?;
        market.config.check_quantity(quantity)?;

        let timestamp = now_nanos();
        market.book.write().place_limit_order(side, price, quantity, timestamp)
    }

    /// Fill a market order completely or not at all
    pub fn place_market_order(
        &self,
        market: &str,
        side: Side,
        quantity: Quantity,
    ) -> Result<Vec<Match>, EngineError> {
        let market = self.market(market)?;
        market.config.check_quantity(quantity)?;

        let timestamp = now_nanos();
        market.book.write().place_market_order(side, quantity, timestamp)
    }

    /// Cancel a resting order; returns it with its unfilled size
    pub fn cancel_order(&self, market: &str, order_id: &OrderId) -> Result<Order, EngineError> {
        self.market(market)?.book.write().cancel_order(order_id)
    }

    /// Consistent view of both sides of a market
    pub fn book_snapshot(&self, market: &str) -> Result<BookSnapshot, EngineError> {
        Ok(self.market(market)?.book.read().snapshot())
    }

    pub fn get_order(&self, market: &str, order_id: &OrderId) -> Result<Order, EngineError> {
        self.market(market)?
            .book
            .read()
            .get_order(order_id)
            .cloned()
            .ok_or_else(|| EngineError::OrderNotFound {
                order_id: order_id.to_string(),
            })
    }

    pub fn ask_total_volume(&self, market: &str) -> Result<Quantity, EngineError> {
        Ok(self.market(market)?.book.read().ask_total_volume())
    }

    pub fn bid_total_volume(&self, market: &str) -> Result<Quantity, EngineError> {
        Ok(self.market(market)?.book.read().bid_total_volume())
    }

    pub fn best_bid(&self, market: &str) -> Result<Option<(Price, Quantity)>, EngineError> {
        Ok(self.market(market)?.book.read().best_bid())
    }

    pub fn best_ask(&self, market: &str) -> Result<Option<(Price, Quantity)>, EngineError> {
        Ok(self.market(market)?.book.read().best_ask())
    }

    /// Aggregated top-of-book as (bids, asks), best first
    pub fn depth(&self, market: &str, levels: usize) -> Result<DepthView, EngineError> {
        let (bids, asks) = self.market(market)?.book.read().depth(levels);
        Ok(DepthView { bids, asks })
    }

    /// Registered market symbols, sorted
    pub fn markets(&self) -> Vec<MarketId> {
        let mut symbols: Vec<_> = self.markets.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

/// Aggregated price levels per side
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DepthView {
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}

fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
}
