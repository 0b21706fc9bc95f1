//! Matching Engine Service
//!
//! In-memory limit order matching for one book per market, under
//! price-time priority.
//!
//! **Behavior:**
//! - Limit orders always rest; they never match on entry
//! - Market orders fill completely against the opposite side or are
//!   rejected with no change to the book
//! - Execution price is always the resting order's price
//!
//! **Key Invariants:**
//! - Side volume == sum of level volumes == sum of resting remaining sizes
//! - Within a price, earlier orders fill first
//! - No empty price level is ever left in the book
//! - Every resting order is in the id index, and nothing else is

pub mod book;
pub mod config;
pub mod engine;
pub mod matching;
pub mod snapshot;

pub use config::{ConfigError, EngineConfig, MarketConfig};
pub use engine::{DepthView, MatchingEngine};
pub use snapshot::BookSnapshot;
