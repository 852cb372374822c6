//! exchangerate.host client.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::http::RetryingClient;
use crate::config::ForexConfig;
use crate::domain::{CurrencyPair, Price};
use crate::error::Result;
use crate::port::RateSource;

const PROVIDER: &str = "exchangerate.host";

#[derive(Debug, Deserialize)]
struct SymbolsResponse {
    #[serde(default)]
    symbols: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    rates: BTreeMap<String, Option<Decimal>>,
}

/// HTTP client for exchangerate.host.
pub struct ExchangeRateClient {
    http: RetryingClient,
    base_url: String,
    access_key: Option<String>,
}

impl ExchangeRateClient {
    #[must_use]
    pub fn from_config(config: &ForexConfig) -> Self {
        Self {
            http: RetryingClient::new(PROVIDER, &config.http),
            base_url: config.base_url.clone(),
            access_key: config.access_key.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{path}", self.base_url.trim_end_matches('/')))?;
        if let Some(key) = &self.access_key {
            url.query_pairs_mut().append_pair("access_key", key);
        }
        Ok(url)
    }

    /// URL of the symbol listing.
    pub fn symbols_url(&self) -> Result<Url> {
        self.endpoint("symbols")
    }

    /// URL of the latest rate for one pair.
    pub fn latest_url(&self, pair: &CurrencyPair) -> Result<Url> {
        let mut url = self.endpoint("latest")?;
        url.query_pairs_mut()
            .append_pair("base", pair.base())
            .append_pair("symbols", pair.quote());
        Ok(url)
    }
}

/// Sorted currency codes from a `/symbols` body.
fn symbol_codes(response: SymbolsResponse) -> Vec<String> {
    response.symbols.into_keys().collect()
}

/// Positive rate for `quote` from a `/latest` body.
fn quote_rate(response: &LatestResponse, quote: &str) -> Option<Price> {
    response
        .rates
        .get(quote)
        .copied()
        .flatten()
        .filter(|rate| *rate > Decimal::ZERO)
}

#[async_trait]
impl RateSource for ExchangeRateClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn symbols(&self) -> Result<Vec<String>> {
        let url = self.symbols_url()?;
        let response: SymbolsResponse = self.http.get_json(&url).await?;
        let codes = symbol_codes(response);
        debug!(count = codes.len(), "Fetched currency symbols");
        Ok(codes)
    }

    async fn mid_rate(&self, pair: &CurrencyPair) -> Result<Option<Price>> {
        let url = self.latest_url(pair)?;
        let response: LatestResponse = self.http.get_json(&url).await?;
        Ok(quote_rate(&response, pair.quote()))
    }
}
