//! Spot-price collaborator (CoinGecko simple-price API).

use std::collections::HashMap;

use crate::{config::PriceFeed, error::ValuationError};

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Aggregator client resolving a price feed to a current spot price.
#[derive(Clone, Debug)]
pub struct SpotOracle {
    http: reqwest::Client,
    api_url: String,
}

impl SpotOracle {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), api_url: api_url.into() }
    }

    /// Current spot price for the feed, or `None` when the aggregator has no
    /// quote for the asset/currency pair. Inverse feeds are flipped before
    /// returning.
    pub async fn price(&self, feed: &PriceFeed) -> Result<Option<f64>, ValuationError> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.api_url, feed.id, feed.vs_currency
        );
        let response: HashMap<String, HashMap<String, f64>> =
            self.http.get(&url).send().await?.json().await?;
        let Some(price) = response.get(&feed.id).and_then(|quotes| quotes.get(&feed.vs_currency))
        else {
            return Ok(None);
        };
        Ok(Some(if feed.inverse { 1.0 / price } else { *price }))
    }
}
