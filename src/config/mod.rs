//! Configuration loading and validation.
//!
//! Every section is optional; a missing section takes its defaults. API keys
//! are read from the environment after parsing and override the file.

mod detection;
mod logging;
mod sources;

pub use detection::DetectionConfig;
pub use logging::{LoggingConfig, LOG_FORMATS};
pub use sources::{ForexConfig, OddsApiConfig, WatchConfig};

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::adapter::odds_api::API_KEY_ENV;
use crate::error::{ConfigError, Result};

/// Environment variable holding the exchangerate.host access key.
pub const FOREX_ACCESS_KEY_ENV: &str = "EXCHANGERATE_ACCESS_KEY";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const REDACTED: &str = "***";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub detection: DetectionConfig,
    pub odds_api: OddsApiConfig,
    pub forex: ForexConfig,
    pub watch: WatchConfig,
}

impl Config {
    /// Parse configuration from TOML, apply environment keys and validate.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file if it exists, otherwise use defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(key) = env_key(API_KEY_ENV) {
            self.odds_api.api_key = Some(key);
        }
        if let Some(key) = env_key(FOREX_ACCESS_KEY_ENV) {
            self.forex.access_key = Some(key);
        }
    }

    /// Copy with secrets masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.odds_api.api_key.is_some() {
            config.odds_api.api_key = Some(REDACTED.into());
        }
        if config.forex.access_key.is_some() {
            config.forex.access_key = Some(REDACTED.into());
        }
        config
    }

    /// Render as TOML.
    #[allow(clippy::result_large_err)]
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::Render)?)
    }

    /// Validate configuration values.
    ///
    /// Checks that required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(invalid("logging.format", "must be 'pretty' or 'json'"));
        }

        let detection = &self.detection;
        if detection.capital <= Decimal::ZERO {
            return Err(invalid("detection.capital", "must be positive"));
        }
        if detection.min_profit_percent < Decimal::ZERO {
            return Err(invalid("detection.min_profit_percent", "must not be negative"));
        }
        if detection.max_legs < 2 {
            return Err(invalid("detection.max_legs", "must be at least 2"));
        }
        if detection.slot_count < 2 {
            return Err(invalid("detection.slot_count", "must be at least 2"));
        }
        if detection.max_enumerated_quotes.is_some_and(|max| max < 2) {
            return Err(invalid("detection.max_enumerated_quotes", "must be at least 2"));
        }
        if detection.outcomes_per_provider == Some(0) {
            return Err(invalid("detection.outcomes_per_provider", "must be positive"));
        }

        if self.odds_api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "odds_api.base_url",
            }
            .into());
        }

        let forex = &self.forex;
        if forex.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "forex.base_url",
            }
            .into());
        }
        if forex.min_profit_percent < Decimal::ZERO {
            return Err(invalid("forex.min_profit_percent", "must not be negative"));
        }
        if forex.spread_min_percent < Decimal::ZERO {
            return Err(invalid("forex.spread_min_percent", "must not be negative"));
        }
        if forex.spread_min_percent > forex.spread_max_percent {
            return Err(invalid(
                "forex.spread_min_percent",
                "must not exceed spread_max_percent",
            ));
        }
        if forex.spread_max_percent >= dec!(100) {
            return Err(invalid("forex.spread_max_percent", "must be below 100"));
        }
        if forex.exchanges.len() != 2 {
            return Err(invalid("forex.exchanges", "exactly two exchanges are required"));
        }
        let names: HashSet<&str> = forex.exchanges.iter().map(|e| e.trim()).collect();
        if names.len() != 2 || names.contains("") {
            return Err(invalid("forex.exchanges", "names must be distinct and non-empty"));
        }
        if forex.max_pairs == 0 {
            return Err(invalid("forex.max_pairs", "must be at least 1"));
        }

        if self.watch.interval_secs == 0 {
            return Err(invalid("watch.interval_secs", "must be positive"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeneratorMode, SlotMatching};
    use crate::error::Error;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.detection, DetectionConfig::default());
        assert_eq!(config.forex.exchanges, vec!["Exchange A", "Exchange B"]);
        assert_eq!(config.watch.interval_secs, 60);
        assert_eq!(config.odds_api.sports.len(), 5);
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [detection]
            mode = "best_price"
            slot_matching = "label"
            capital = 500
            min_profit_percent = 0.5

            [odds_api.http]
            retry_max_attempts = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.detection.mode, GeneratorMode::BestPrice);
        assert_eq!(config.detection.slot_matching, SlotMatching::Label);
        assert_eq!(config.detection.capital, dec!(500));
        assert_eq!(config.detection.min_profit_percent, dec!(0.5));
        assert_eq!(config.odds_api.http.retry_max_attempts, 4);
        assert_eq!(config.odds_api.http.retry_backoff_ms, 500);
    }

    #[test]
    fn rejects_identical_exchanges() {
        let result = Config::parse_toml(
            r#"
            [forex]
            exchanges = ["Same", "Same"]
            "#,
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "forex.exchanges",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            }))
        ));
    }

    #[test]
    fn redaction_masks_keys() {
        let mut config = Config::default();
        config.odds_api.api_key = Some("secret".into());
        let shown = config.redacted();
        assert_eq!(shown.odds_api.api_key.as_deref(), Some("***"));
        assert_eq!(shown.forex.access_key, None);
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        let reparsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.detection, config.detection);
        assert_eq!(reparsed.forex.spread_min_percent, config.forex.spread_min_percent);
    }
}
