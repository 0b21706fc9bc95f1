//! Error types for the matching engine
//!
//! Every failure is per-operation and recoverable; none aborts the process.

use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity { requested: String, available: String },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },

    #[error("Market not found: {market}")]
    MarketNotFound { market: String },
}

/// Malformed caller input, rejected before the book is touched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Unknown side: {0}")]
    UnknownSide(String),

    #[error("Invalid market: {0}")]
    InvalidMarket(String),

    #[error("{field} has {scale} decimal places, market allows {max_scale}")]
    PrecisionExceeded {
        field: &'static str,
        scale: u32,
        max_scale: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidPrice("negative".to_string());
        assert_eq!(err.to_string(), "Invalid price: negative");
    }

    #[test]
    fn test_insufficient_liquidity_display() {
        let err = EngineError::InsufficientLiquidity {
            requested: "21".to_string(),
            available: "20".to_string(),
        };
        assert!(err.to_string().contains("21"));
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_engine_error_from_validation_error() {
        let err: EngineError = ValidationError::UnknownSide("hold".into()).into();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_precision_exceeded_display() {
        let err = ValidationError::PrecisionExceeded {
            field: "price",
            scale: 4,
            max_scale: 2,
        };
        assert_eq!(err.to_string(), "price has 4 decimal places, market allows 2");
    }
}
