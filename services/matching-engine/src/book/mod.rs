//! Order book infrastructure module
//!
//! Contains price levels, book sides, and the per-market order book.

pub mod limit;
pub mod side;
pub mod order_book;

pub use limit::{FillReport, Limit};
pub use side::BookSide;
pub use order_book::OrderBook;
