use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use arbscan::domain::{CurrencyPair, Price, RawEvent};
use arbscan::error::{Error, Result, UpstreamError};
use arbscan::port::{OddsSource, RateSource};
use async_trait::async_trait;

/// Odds source serving canned events per sport; unknown sports fail.
pub struct StaticOddsSource {
    pub events: HashMap<String, Vec<RawEvent>>,
}

impl StaticOddsSource {
    pub fn new(sport: &str, events: Vec<RawEvent>) -> Self {
        Self {
            events: HashMap::from([(sport.to_string(), events)]),
        }
    }
}

#[async_trait]
impl OddsSource for StaticOddsSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_events(&self, sport: &str) -> Result<Vec<RawEvent>> {
        self.events.get(sport).cloned().ok_or_else(|| {
            Error::from(UpstreamError::Status {
                status: 404,
                body: format!("unknown sport {sport}"),
            })
        })
    }
}

/// Rate source with fixed mid rates; pairs without a rate fail.
pub struct StaticRateSource {
    pub symbols: Option<Vec<String>>,
    pub rates: HashMap<String, Price>,
    pub requests: AtomicUsize,
}

impl StaticRateSource {
    pub fn new(rates: &[(&str, Price)]) -> Self {
        Self {
            symbols: None,
            rates: rates
                .iter()
                .map(|(pair, rate)| ((*pair).to_string(), *rate))
                .collect(),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn with_symbols(mut self, symbols: &[&str]) -> Self {
        self.symbols = Some(symbols.iter().map(|s| (*s).to_string()).collect());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    fn name(&self) -> &str {
        "static-rates"
    }

    async fn symbols(&self) -> Result<Vec<String>> {
        self.symbols.clone().ok_or_else(|| {
            Error::from(UpstreamError::Status {
                status: 503,
                body: "symbols offline".into(),
            })
        })
    }

    async fn mid_rate(&self, pair: &CurrencyPair) -> Result<Option<Price>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.rates.get(&pair.to_string()) {
            Some(rate) => Ok(Some(*rate)),
            None => Err(UpstreamError::Status {
                status: 500,
                body: format!("no rate for {pair}"),
            }
            .into()),
        }
    }
}
