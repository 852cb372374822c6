//! Forex scan: mid rate → simulated quotes → spread detection.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::status::SourceStatus;
use crate::config::ForexConfig;
use crate::domain::forex::{currency_pairs, detect_spread, SpreadSimulator, FALLBACK_CURRENCIES};
use crate::domain::{CurrencyPair, Percent, SourceId, SpreadOpportunity};
use crate::port::RateSource;

/// Result of one forex scan.
#[derive(Debug, Clone)]
pub struct ForexReport {
    pub source: String,
    pub status: SourceStatus,
    pub pairs_requested: usize,
    pub pairs_quoted: usize,
    pub failed_requests: usize,
    pub opportunities: Vec<SpreadOpportunity>,
}

/// Scans currency pairs one request at a time.
pub struct ForexScanner {
    simulator: SpreadSimulator,
    min_profit_percent: Percent,
    max_pairs: usize,
    request_delay: Duration,
}

impl ForexScanner {
    pub fn new(
        simulator: SpreadSimulator,
        min_profit_percent: Percent,
        max_pairs: usize,
        request_delay: Duration,
    ) -> Self {
        Self {
            simulator,
            min_profit_percent,
            max_pairs,
            request_delay,
        }
    }

    pub fn from_config(config: &ForexConfig) -> Self {
        let exchanges = [
            config.exchanges.first().map_or("Exchange A", String::as_str),
            config.exchanges.get(1).map_or("Exchange B", String::as_str),
        ]
        .map(SourceId::from);
        let simulator = SpreadSimulator::new(
            exchanges,
            config.spread_min_percent,
            config.spread_max_percent,
            config.split,
            config.seed,
        );
        Self::new(
            simulator,
            config.min_profit_percent,
            config.max_pairs,
            Duration::from_millis(config.request_delay_ms),
        )
    }

    pub fn pairs<S: AsRef<str>>(&self, currencies: &[S]) -> Vec<CurrencyPair> {
        currency_pairs(currencies, self.max_pairs)
    }

    /// Fetch a mid rate per pair and look for spreads.
    pub async fn scan(&mut self, source: &dyn RateSource, pairs: &[CurrencyPair]) -> ForexReport {
        let mut report = ForexReport {
            source: source.name().to_string(),
            status: SourceStatus::Ok,
            pairs_requested: pairs.len(),
            pairs_quoted: 0,
            failed_requests: 0,
            opportunities: Vec::new(),
        };
        let mut last_error = None;

        for (i, pair) in pairs.iter().enumerate() {
            if i > 0 && !self.request_delay.is_zero() {
                sleep(self.request_delay).await;
            }

            let mid = match source.mid_rate(pair).await {
                Ok(Some(mid)) => mid,
                Ok(None) => {
                    debug!(pair = %pair, "No rate for pair");
                    continue;
                }
                Err(err) => {
                    warn!(pair = %pair, error = %err, "Rate request failed");
                    report.failed_requests += 1;
                    last_error = Some(err.to_string());
                    continue;
                }
            };

            report.pairs_quoted += 1;
            let snapshot = self.simulator.simulate(pair.clone(), mid);
            if let Some(opportunity) = detect_spread(&snapshot, self.min_profit_percent) {
                report.opportunities.push(opportunity);
            }
        }

        if report.failed_requests > 0 && report.failed_requests == report.pairs_requested {
            report.status = SourceStatus::unavailable(last_error.unwrap_or_default());
        }

        info!(
            source = %report.source,
            pairs = report.pairs_requested,
            quoted = report.pairs_quoted,
            failed = report.failed_requests,
            opportunities = report.opportunities.len(),
            "Forex scan complete"
        );
        report
    }
}

/// Every currency the source lists, or the fallback set when it cannot say.
pub async fn discover_currencies(source: &dyn RateSource) -> Vec<String> {
    match source.symbols().await {
        Ok(symbols) if !symbols.is_empty() => symbols,
        Ok(_) => {
            warn!(source = source.name(), "Empty symbol listing, using fallback currencies");
            FALLBACK_CURRENCIES.map(String::from).to_vec()
        }
        Err(err) => {
            warn!(source = source.name(), error = %err, "Symbol listing unavailable, using fallback currencies");
            FALLBACK_CURRENCIES.map(String::from).to_vec()
        }
    }
}
