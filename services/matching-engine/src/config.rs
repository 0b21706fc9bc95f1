//! Engine configuration
//!
//! The set of markets is fixed when the engine is built. Each market
//! carries the number of decimal places it accepts for prices and sizes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use types::errors::ValidationError;
use types::ids::MarketId;
use types::numeric::{Price, Quantity};

/// Default decimal places for prices and sizes
pub const DEFAULT_SCALE: u32 = 8;

/// rust_decimal carries at most 28 fractional digits
pub const MAX_SCALE: u32 = 28;

/// Configuration errors, raised before the engine is constructed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid market symbol: {0}")]
    InvalidMarket(#[from] ValidationError),

    #[error("no markets configured")]
    NoMarkets,

    #[error("market {0} configured more than once")]
    DuplicateMarket(MarketId),

    #[error("market {market}: scale {scale} exceeds the supported maximum of {max}")]
    ScaleTooLarge { market: MarketId, scale: u32, max: u32 },
}

/// Configuration for the matching engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub markets: Vec<MarketConfig>,
}

/// Per-market settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub symbol: MarketId,
    /// Maximum decimal places in a price
    #[serde(default = "default_scale")]
    pub price_scale: u32,
    /// Maximum decimal places in a size
    #[serde(default = "default_scale")]
    pub quantity_scale: u32,
}

fn default_scale() -> u32 {
    DEFAULT_SCALE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            markets: vec![MarketConfig::new(MarketId::new("ETH"))],
        }
    }
}

impl EngineConfig {
    /// Build a config with default scales for each symbol
    pub fn with_markets<I, S>(symbols: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let markets = symbols
            .into_iter()
            .map(|s| MarketId::try_new(s).map(MarketConfig::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { markets })
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.markets.is_empty() {
            return Err(ConfigError::NoMarkets);
        }

        let mut seen = HashSet::new();
        for market in &self.markets {
            if !seen.insert(&market.symbol) {
                return Err(ConfigError::DuplicateMarket(market.symbol.clone()));
            }
            for scale in [market.price_scale, market.quantity_scale] {
                if scale > MAX_SCALE {
                    return Err(ConfigError::ScaleTooLarge {
                        market: market.symbol.clone(),
                        scale,
                        max: MAX_SCALE,
                    });
                }
            }
        }
        Ok(())
    }
}

impl MarketConfig {
    pub fn new(symbol: MarketId) -> Self {
        Self {
            symbol,
            price_scale: DEFAULT_SCALE,
            quantity_scale: DEFAULT_SCALE,
        }
    }

    pub fn check_price(&self, price: Price) -> Result<(), ValidationError> {
        check_scale("price", price.scale(), self.price_scale)
    }

    pub fn check_quantity(&self, quantity: Quantity) -> Result<(), ValidationError> {
        check_scale("quantity", quantity.scale(), self.quantity_scale)
    }
}

fn check_scale(field: &'static str, scale: u32, max_scale: u32) -> Result<(), ValidationError> {
    if scale > max_scale {
        return Err(ValidationError::PrecisionExceeded {
            field,
            scale,
            max_scale,
        });
    }
    Ok(())
}
