//! Price level with a FIFO queue of resting orders
//!
//! A `Limit` owns every order resting at one price on one side. Orders are
//! kept in arrival order and are only ever removed in place, so the relative
//! order of the survivors never changes and time priority holds across calls.

use std::collections::VecDeque;
use types::execution::Match;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

use crate::matching::executor::execute_fill;

/// All orders resting at a single price
#[derive(Debug, Clone)]
pub struct Limit {
    price: Price,
    /// Oldest order at the front
    orders: VecDeque<Order>,
    /// Always equals the sum of the orders' remaining sizes
    total_quantity: Quantity,
}

/// Result of sweeping one level with an aggressor
#[derive(Debug, Clone, Default)]
pub struct FillReport {
    /// Fills in execution order
    pub matches: Vec<Match>,
    /// Makers that reached zero and left the level, oldest first
    pub filled: Vec<Order>,
}

impl FillReport {
    /// Total size crossed at this level
    pub fn filled_quantity(&self) -> Quantity {
        self.matches.iter().map(|m| m.quantity).sum()
    }
}

impl Limit {
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_quantity: Quantity::zero(),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Append an order at the back of the queue (time priority)
    ///
    /// The order's back-reference is pointed at this level's price.
    pub fn add_order(&mut self, mut order: Order) {
        order.limit_price = Some(self.price);
        self.total_quantity = self.total_quantity + order.remaining_quantity;
        self.orders.push_back(order);
    }

    /// Remove an order by id, keeping the rest of the queue in order
    ///
    /// Returns the removed order, or None if it does not rest here.
    pub fn remove_order(&mut self, order_id: &OrderId) -> Option<Order> {
        let position = self.orders.iter().position(|o| &o.order_id == order_id)?;
        let order = self.orders.remove(position)?;
        self.total_quantity = self.total_quantity.saturating_sub(order.remaining_quantity);
        Some(order)
    }

    /// Match `taker` against the resting orders, oldest first
    ///
    /// Stops as soon as the taker is exhausted. Makers that reach zero are
    /// taken out of the queue; a partially filled maker keeps its place.
    pub fn fill(&mut self, taker: &mut Order) -> FillReport {
        let mut report = FillReport::default();

        for maker in self.orders.iter_mut() {
            if taker.is_filled() {
                break;
            }
            let m = execute_fill(maker, taker, self.price);
            self.total_quantity = self.total_quantity.saturating_sub(m.quantity);
            report.matches.push(m);
        }

        // Filled makers always form a prefix of the queue.
        while self.orders.front().is_some_and(Order::is_filled) {
            if let Some(order) = self.orders.pop_front() {
                report.filled.push(order);
            }
        }

        report
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.order_id == order_id)
    }

    /// Resting orders in arrival order
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::order::{OrderStatus, Side};

    fn bid(seq: u64, qty: &str) -> Order {
        Order::limit(Side::BUY, Price::from_u64(10000), Quantity::from_str(qty).unwrap(), seq, 0)
    }

    fn level_with(sizes: &[&str]) -> (Limit, Vec<OrderId>) {
        let mut level = Limit::new(Price::from_u64(10000));
        let mut ids = Vec::new();
        for (i, qty) in sizes.iter().enumerate() {
            let order = bid(i as u64 + 1, qty);
            ids.push(order.order_id);
            level.add_order(order);
        }
        (level, ids)
    }

    fn queue_ids(level: &Limit) -> Vec<OrderId> {
        level.orders().map(|o| o.order_id).collect()
    }

    #[test]
    fn test_add_order_sets_back_reference() {
        let (level, ids) = level_with(&["1.5"]);

        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_quantity(), Quantity::from_str("1.5").unwrap());
        assert_eq!(level.get(&ids[0]).unwrap().limit_price, Some(Price::from_u64(10000)));
    }

    #[test]
    fn test_remove_middle_order_keeps_fifo() {
        let (mut level, ids) = level_with(&["5", "8", "10"]);

        let removed = level.remove_order(&ids[1]).unwrap();

        assert_eq!(removed.remaining_quantity, Quantity::from_u64(8));
        assert_eq!(queue_ids(&level), vec![ids[0], ids[2]]);
        assert_eq!(level.total_quantity(), Quantity::from_u64(15));
    }

    #[test]
    fn test_remove_unknown_order() {
        let (mut level, _) = level_with(&["5"]);
        assert!(level.remove_order(&OrderId::new()).is_none());
        assert_eq!(level.total_quantity(), Quantity::from_u64(5));
    }

    #[test]
    fn test_fill_oldest_first() {
        let (mut level, ids) = level_with(&["10", "1"]);
        let mut taker = Order::market(Side::SELL, Quantity::from_u64(5), 99, 0);

        let report = level.fill(&mut taker);

        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].maker_order_id, ids[0]);
        assert_eq!(report.matches[0].quantity, Quantity::from_u64(5));
        assert!(report.filled.is_empty());
        assert!(taker.is_filled());

        let front = level.get(&ids[0]).unwrap();
        assert_eq!(front.remaining_quantity, Quantity::from_u64(5));
        assert_eq!(front.status, OrderStatus::PartiallyFilled);
        assert_eq!(level.get(&ids[1]).unwrap().remaining_quantity, Quantity::from_u64(1));
        assert_eq!(level.total_quantity(), Quantity::from_u64(6));
    }

    #[test]
    fn test_fill_removes_exhausted_makers() {
        let (mut level, ids) = level_with(&["2", "3", "4"]);
        let mut taker = Order::market(Side::SELL, Quantity::from_u64(6), 99, 0);

        let report = level.fill(&mut taker);

        assert_eq!(report.matches.len(), 3);
        assert_eq!(report.filled_quantity(), Quantity::from_u64(6));
        let filled: Vec<_> = report.filled.iter().map(|o| o.order_id).collect();
        assert_eq!(filled, vec![ids[0], ids[1]]);
        assert_eq!(queue_ids(&level), vec![ids[2]]);
        assert_eq!(level.total_quantity(), Quantity::from_u64(3));
    }

    #[test]
    fn test_fill_entire_level() {
        let (mut level, _) = level_with(&["2", "3"]);
        let mut taker = Order::market(Side::SELL, Quantity::from_u64(9), 99, 0);

        let report = level.fill(&mut taker);

        assert!(level.is_empty());
        assert_eq!(level.total_quantity(), Quantity::zero());
        assert_eq!(report.filled.len(), 2);
        assert_eq!(taker.remaining_quantity, Quantity::from_u64(4));
    }

    #[test]
    fn test_fifo_survives_repeated_fills() {
        let (mut level, ids) = level_with(&["3", "3", "3"]);

        let mut first = Order::market(Side::SELL, Quantity::from_u64(4), 10, 0);
        level.fill(&mut first);
        let mut second = Order::market(Side::SELL, Quantity::from_u64(1), 11, 0);
        let report = level.fill(&mut second);

        // Second order at the level was partially hit first time round and
        // must still be next in line.
        assert_eq!(report.matches[0].maker_order_id, ids[1]);
        assert_eq!(queue_ids(&level), vec![ids[1], ids[2]]);
        assert_eq!(level.total_quantity(), Quantity::from_u64(4));
    }

    #[test]
    fn test_total_quantity_invariant() {
        let (level, _) = level_with(&["1.5", "2.5", "3.0"]);
        let sum: Quantity = level.orders().map(|o| o.remaining_quantity).sum();
        assert_eq!(level.total_quantity(), sum);
        assert_eq!(level.total_quantity(), Quantity::from_str("7.0").unwrap());
    }
}
