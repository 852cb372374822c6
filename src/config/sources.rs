//! Upstream source and watch-loop settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::adapter::HttpSettings;
use crate::domain::forex::{
    SplitMode, DEFAULT_EXCHANGES, DEFAULT_FOREX_MIN_PROFIT_PERCENT, DEFAULT_SPREAD_PERCENT,
};
use crate::domain::Percent;

/// `[odds_api]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsApiConfig {
    pub base_url: String,
    /// Comma-separated bookmaker regions.
    pub regions: String,
    /// Market requested from the API and read by the collector.
    pub market_key: String,
    /// Sports scanned when none are given on the command line.
    pub sports: Vec<String>,
    /// Overridden by `ODDS_API_KEY`.
    pub api_key: Option<String>,
    pub http: HttpSettings,
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.the-odds-api.com/v4".into(),
            regions: "us,uk,eu,au".into(),
            market_key: "h2h".into(),
            sports: [
                "basketball_nba",
                "mma_mixed_martial_arts",
                "soccer_epl",
                "cricket_ipl",
                "tennis_atp_italian_open",
            ]
            .map(String::from)
            .to_vec(),
            api_key: None,
            http: HttpSettings::default(),
        }
    }
}

/// `[forex]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForexConfig {
    pub base_url: String,
    /// Overridden by `EXCHANGERATE_ACCESS_KEY`.
    pub access_key: Option<String>,
    /// Names of the two simulated exchanges.
    pub exchanges: Vec<String>,
    /// Currencies paired when not scanning every listed symbol.
    pub currencies: Vec<String>,
    pub spread_min_percent: Percent,
    pub spread_max_percent: Percent,
    pub split: SplitMode,
    pub min_profit_percent: Percent,
    pub max_pairs: usize,
    /// Pause between sequential rate requests.
    pub request_delay_ms: u64,
    /// Seed for the random split.
    pub seed: Option<u64>,
    pub http: HttpSettings,
}

impl Default for ForexConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.exchangerate.host".into(),
            access_key: None,
            exchanges: DEFAULT_EXCHANGES.map(String::from).to_vec(),
            currencies: ["USD", "EUR", "INR", "GBP", "JPY"].map(String::from).to_vec(),
            spread_min_percent: DEFAULT_SPREAD_PERCENT,
            spread_max_percent: DEFAULT_SPREAD_PERCENT,
            split: SplitMode::Even,
            min_profit_percent: DEFAULT_FOREX_MIN_PROFIT_PERCENT,
            max_pairs: 300,
            request_delay_ms: 1000,
            seed: None,
            http: HttpSettings::default(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Seconds between scans.
    pub interval_secs: u64,
    /// Bookmark opportunities at or above this profit.
    pub bookmark_above_percent: Option<Decimal>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            bookmark_above_percent: None,
        }
    }
}
