//! The Odds API (v4) client.
//!
//! Fetches `/sports/{sport}/odds` in decimal format. The response body is
//! already the raw event shape the collector understands, so no DTO layer
//! sits in between.

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use super::http::RetryingClient;
use crate::config::OddsApiConfig;
use crate::domain::RawEvent;
use crate::error::{Result, UpstreamError};
use crate::port::OddsSource;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ODDS_API_KEY";

const PROVIDER: &str = "the-odds-api";

/// HTTP client for The Odds API.
pub struct OddsApiClient {
    http: RetryingClient,
    base_url: String,
    regions: String,
    markets: String,
    api_key: Option<String>,
}

impl OddsApiClient {
    #[must_use]
    pub fn from_config(config: &OddsApiConfig) -> Self {
        Self {
            http: RetryingClient::new(PROVIDER, &config.http),
            base_url: config.base_url.clone(),
            regions: config.regions.clone(),
            markets: config.market_key.clone(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
        }
    }

    /// Replace the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the odds URL for `sport`, including the key.
    pub fn odds_url(&self, sport: &str) -> Result<Url> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey {
            provider: PROVIDER,
            env_var: API_KEY_ENV,
        })?;

        let mut url = Url::parse(&format!(
            "{}/sports/{}/odds",
            self.base_url.trim_end_matches('/'),
            sport
        ))?;
        url.query_pairs_mut()
            .append_pair("apiKey", api_key)
            .append_pair("regions", &self.regions)
            .append_pair("markets", &self.markets)
            .append_pair("oddsFormat", "decimal");
        Ok(url)
    }
}

#[async_trait]
impl OddsSource for OddsApiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_events(&self, sport: &str) -> Result<Vec<RawEvent>> {
        let url = self.odds_url(sport)?;
        info!(sport, regions = %self.regions, "Fetching odds");

        let events: Vec<RawEvent> = self.http.get_json(&url).await?;
        debug!(sport, count = events.len(), "Fetched events");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn client() -> OddsApiClient {
        OddsApiClient::from_config(&OddsApiConfig::default())
    }

    #[test]
    fn odds_url_carries_query_parameters() {
        let client = client().with_api_key("secret");
        let url = client.odds_url("basketball_nba").unwrap();

        assert_eq!(url.path(), "/v4/sports/basketball_nba/odds");
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![
                ("apiKey".into(), "secret".into()),
                ("regions".into(), "us,uk,eu,au".into()),
                ("markets".into(), "h2h".into()),
                ("oddsFormat".into(), "decimal".into()),
            ]
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let config = OddsApiConfig {
            base_url: "https://odds.example/v4/".into(),
            ..OddsApiConfig::default()
        };
        let client = OddsApiClient::from_config(&config).with_api_key("k");
        let url = client.odds_url("soccer_epl").unwrap();
        assert_eq!(url.host_str(), Some("odds.example"));
        assert_eq!(url.path(), "/v4/sports/soccer_epl/odds");
    }

    #[test]
    fn missing_key_is_an_upstream_error() {
        let config = OddsApiConfig {
            api_key: Some("   ".into()),
            ..OddsApiConfig::default()
        };
        let client = OddsApiClient::from_config(&config);
        assert!(!client.has_api_key());

        let err = client.odds_url("soccer_epl").unwrap_err();
        assert!(err.is_upstream());
        assert!(matches!(
            err,
            Error::Upstream(UpstreamError::MissingApiKey {
                env_var: API_KEY_ENV,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn fetch_without_key_fails_before_network() {
        let config = OddsApiConfig {
            api_key: None,
            ..OddsApiConfig::default()
        };
        let client = OddsApiClient::from_config(&config);
        assert!(client.fetch_events("soccer_epl").await.is_err());
    }
}
