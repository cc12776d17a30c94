//! Runtime configuration.
//!
//! One explicit object owned by the caller and passed into each collaborator
//! at construction; nothing is read from the environment after startup.

use std::{collections::HashMap, path::Path};

use serde::Deserialize;

use crate::error::ValuationError;

/// Keys and price-feed mappings for the external collaborators.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Block-explorer API key.
    #[serde(default)]
    pub etherscan_key: Option<String>,

    /// Maps a contract price identifier (e.g. `USDETH`) to the spot feed
    /// used when no explicit settlement price is given.
    #[serde(default)]
    pub price_feeds: HashMap<String, PriceFeed>,
}

/// One entry of the price-identifier mapping.
#[derive(Clone, Debug, Deserialize)]
pub struct PriceFeed {
    /// Aggregator asset id, e.g. `ethereum`.
    pub id: String,
    /// Quote currency the aggregator should report in.
    pub vs_currency: String,
    /// Some identifiers are quoted as 1/x of what the feed reports.
    #[serde(default)]
    pub inverse: bool,
}

impl Config {
    /// Loads the JSON config file. A missing file yields the defaults;
    /// `ETHERSCAN_KEY` in the environment overrides the file value.
    pub fn load(path: &Path) -> Result<Self, ValuationError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str::<Config>(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(err) => return Err(err.into()),
        };
        if let Ok(key) = std::env::var("ETHERSCAN_KEY") {
            config.etherscan_key = Some(key);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_feeds() {
        let raw = r#"{
            "etherscan_key": "K",
            "price_feeds": {
                "USDETH": { "id": "ethereum", "vs_currency": "usd", "inverse": true },
                "BTCUSD": { "id": "bitcoin", "vs_currency": "usd" }
            }
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.etherscan_key.as_deref(), Some("K"));
        assert!(config.price_feeds["USDETH"].inverse);
        assert!(!config.price_feeds["BTCUSD"].inverse);
        assert_eq!(config.price_feeds["BTCUSD"].id, "bitcoin");
    }

    #[test]
    fn test_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.etherscan_key.is_none());
        assert!(config.price_feeds.is_empty());
    }
}
