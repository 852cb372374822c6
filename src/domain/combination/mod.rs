//! Combination generators.
//!
//! A generator turns one [`EventQuoteSet`] into the candidate leg-sets the
//! calculator tests. Two policies are available:
//!
//! - **BestPrice**: one combination per event, the best price per outcome slot.
//! - **FullEnumeration**: every subset of 2..=max_legs quotes across all
//!   providers. Duplicate-outcome subsets are generated too; only the
//!   profitability check filters them.
//!
//! # Example
//!
//! ```
//! use arbscan::domain::combination::{CombinationGenerator, FullEnumerationGenerator};
//! use arbscan::domain::EventQuoteSet;
//!
//! let generator = FullEnumerationGenerator::new(4);
//! let set = EventQuoteSet::new("A vs B", None, vec![]);
//! assert_eq!(generator.combinations(&set).count(), 0);
//! ```

mod best_price;
mod enumeration;

pub use best_price::BestPriceGenerator;
pub use enumeration::{Combinations, FullEnumerationGenerator};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::quote::{EventQuoteSet, Leg};

/// Produces candidate leg combinations for one event.
pub trait CombinationGenerator: Send + Sync {
    /// Unique identifier used in configuration and logging.
    fn name(&self) -> &'static str;

    /// Lazily produce the combinations to test, in a deterministic order.
    fn combinations<'a>(
        &'a self,
        set: &'a EventQuoteSet,
    ) -> Box<dyn Iterator<Item = Vec<Leg>> + 'a>;
}

/// Which generator a scan uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorMode {
    /// Every subset of 2..=max_legs quotes.
    #[default]
    FullEnumeration,
    /// Best price per outcome slot.
    BestPrice,
}

/// How best-price mode lines up quotes from different providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotMatching {
    /// Slot `i` is each provider's `i`-th quote.
    ///
    /// Does not check that slots refer to the same outcome when providers
    /// order their outcomes differently.
    #[default]
    Positional,
    /// Slots are the distinct outcome labels in first-seen order.
    Label,
}

impl GeneratorMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullEnumeration => "full_enumeration",
            Self::BestPrice => "best_price",
        }
    }
}

impl SlotMatching {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positional => "positional",
            Self::Label => "label",
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace('-', "_")
}

impl FromStr for GeneratorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "full_enumeration" => Ok(Self::FullEnumeration),
            "best_price" => Ok(Self::BestPrice),
            other => Err(format!(
                "unknown mode '{other}' (expected full_enumeration or best_price)"
            )),
        }
    }
}

impl FromStr for SlotMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "positional" => Ok(Self::Positional),
            "label" => Ok(Self::Label),
            other => Err(format!(
                "unknown slot matching '{other}' (expected positional or label)"
            )),
        }
    }
}

impl fmt::Display for GeneratorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SlotMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
