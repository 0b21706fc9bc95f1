//! Matching logic module
//!
//! Price overlap checks and maker/taker fill execution

pub mod crossing;
pub mod executor;

pub use crossing::prices_overlap;
pub use executor::execute_fill;
