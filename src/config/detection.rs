//! Sports detection settings and the generator factory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::combination::{BestPriceGenerator, FullEnumerationGenerator};
use crate::domain::{
    ArbitrageCalculator, CombinationGenerator, GeneratorMode, OutcomeCollector, Percent,
    SlotMatching, DEFAULT_CAPITAL, DEFAULT_MIN_PROFIT_PERCENT,
};

/// `[detection]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Which combination generator to run.
    #[serde(default)]
    pub mode: GeneratorMode,
    /// How best-price mode aligns provider quotes.
    #[serde(default)]
    pub slot_matching: SlotMatching,
    /// Outcome slots in best-price mode.
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,
    /// Largest combination in full-enumeration mode.
    #[serde(default = "default_max_legs")]
    pub max_legs: usize,
    /// Notional the stakes are sized against.
    #[serde(default = "default_capital")]
    pub capital: Decimal,
    /// Opportunities below this profit are dropped.
    #[serde(default = "default_min_profit_percent")]
    pub min_profit_percent: Percent,
    /// Skip full enumeration for events with more quotes than this.
    #[serde(default)]
    pub max_enumerated_quotes: Option<usize>,
    /// Read only this many leading outcomes per provider.
    #[serde(default)]
    pub outcomes_per_provider: Option<usize>,
}

const fn default_slot_count() -> usize {
    2
}

const fn default_max_legs() -> usize {
    4
}

const fn default_capital() -> Decimal {
    DEFAULT_CAPITAL
}

const fn default_min_profit_percent() -> Percent {
    DEFAULT_MIN_PROFIT_PERCENT
}

impl DetectionConfig {
    /// Build the configured combination generator.
    pub fn generator(&self) -> Box<dyn CombinationGenerator> {
        match self.mode {
            GeneratorMode::FullEnumeration => {
                Box::new(FullEnumerationGenerator::new(self.max_legs))
            }
            GeneratorMode::BestPrice => {
                Box::new(BestPriceGenerator::new(self.slot_count, self.slot_matching))
            }
        }
    }

    /// Build the configured calculator.
    pub const fn calculator(&self) -> ArbitrageCalculator {
        ArbitrageCalculator::new(self.capital, self.min_profit_percent)
    }

    /// Build a collector reading the given market.
    pub fn collector(&self, market_key: &str) -> OutcomeCollector {
        OutcomeCollector::new(market_key, self.outcomes_per_provider)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            mode: GeneratorMode::default(),
            slot_matching: SlotMatching::default(),
            slot_count: default_slot_count(),
            max_legs: default_max_legs(),
            capital: default_capital(),
            min_profit_percent: default_min_profit_percent(),
            max_enumerated_quotes: None,
            outcomes_per_provider: None,
        }
    }
}
