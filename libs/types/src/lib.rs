//! Types library for the limit order matching engine
//!
//! Shared value types used by the engine and by whatever layer drives it.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, MarketId)
//! - `numeric`: Fixed-point decimal types (Price, Quantity)
//! - `order`: Order lifecycle types
//! - `execution`: Match records
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod execution;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::execution::*;
    pub use crate::errors::*;
}
