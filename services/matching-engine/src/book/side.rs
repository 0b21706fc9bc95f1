//! One side of the order book
//!
//! Levels live in a hash map keyed by price for constant-time lookup, while a
//! `BTreeSet` of the same prices gives the best price in O(log n). Asks rank
//! lowest price first, bids highest price first.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::limit::{FillReport, Limit};

/// All resting liquidity on one side of a market
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    levels: HashMap<Price, Limit>,
    /// Same keys as `levels`, kept sorted
    prices: BTreeSet<Price>,
    /// Sum of all level volumes, maintained incrementally
    total_volume: Quantity,
}

impl BookSide {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: HashMap::new(),
            prices: BTreeSet::new(),
            total_volume: Quantity::zero(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Rest an order at `price`, creating the level on first use
    pub fn insert(&mut self, price: Price, order: Order) {
        self.total_volume = self.total_volume + order.remaining_quantity;
        let level = match self.levels.entry(price) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.prices.insert(price);
                entry.insert(Limit::new(price))
            }
        };
        level.add_order(order);
    }

    /// Remove a resting order, dropping its level if that empties it
    pub fn remove(&mut self, order_id: &OrderId, price: Price) -> Option<Order> {
        let level = self.levels.get_mut(&price)?;
        let order = level.remove_order(order_id)?;
        self.total_volume = self.total_volume.saturating_sub(order.remaining_quantity);
        if level.is_empty() {
            self.remove_level(price);
        }
        Some(order)
    }

    /// Sweep the best level with `taker`
    ///
    /// Returns None when the side is empty. The level is dropped once its
    /// last order fills.
    pub fn fill_best(&mut self, taker: &mut Order) -> Option<(Price, FillReport)> {
        let price = self.best_price()?;
        let level = self.levels.get_mut(&price)?;
        let report = level.fill(taker);
        let emptied = level.is_empty();

        self.total_volume = self.total_volume.saturating_sub(report.filled_quantity());
        if emptied {
            self.remove_level(price);
        }
        Some((price, report))
    }

    fn remove_level(&mut self, price: Price) {
        self.levels.remove(&price);
        self.prices.remove(&price);
    }

    pub fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::SELL => self.prices.first().copied(),
            Side::BUY => self.prices.last().copied(),
        }
    }

    /// Best price with the volume resting there
    pub fn best(&self) -> Option<(Price, Quantity)> {
        let price = self.best_price()?;
        self.levels.get(&price).map(|level| (price, level.total_quantity()))
    }

    /// Levels ordered best to worst
    pub fn levels(&self) -> impl Iterator<Item = &Limit> + '_ {
        let prices: Box<dyn Iterator<Item = &Price> + '_> = match self.side {
            Side::SELL => Box::new(self.prices.iter()),
            Side::BUY => Box::new(self.prices.iter().rev()),
        };
        prices.filter_map(move |price| self.levels.get(price))
    }

    /// Top `depth` levels as (price, aggregate size), best first
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels()
            .take(depth)
            .map(|level| (level.price(), level.total_quantity()))
            .collect()
    }

    pub fn level(&self, price: Price) -> Option<&Limit> {
        self.levels.get(&price)
    }

    pub fn total_volume(&self) -> Quantity {
        self.total_volume
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn order_count(&self) -> usize {
        self.levels.values().map(Limit::order_count).sum()
    }
}
