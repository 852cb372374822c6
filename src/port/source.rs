//! Quote source ports.

use async_trait::async_trait;

use crate::domain::{CurrencyPair, Price, RawEvent};
use crate::error::Result;

/// Supplies raw sports events for a sport key.
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Source name for logging and reports.
    fn name(&self) -> &str;

    /// Whether events from this source are generated demo data.
    fn is_synthetic(&self) -> bool {
        false
    }

    /// Fetch every event currently listed for `sport`.
    ///
    /// An `Err` means the source could not be reached or decoded; an empty
    /// list means the source answered with no events.
    async fn fetch_events(&self, sport: &str) -> Result<Vec<RawEvent>>;
}

/// Supplies currency listings and mid-market rates.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Source name for logging and reports.
    fn name(&self) -> &str;

    /// Every currency code the source can quote.
    async fn symbols(&self) -> Result<Vec<String>>;

    /// Mid rate for `pair`, or `None` when the source has no rate for it.
    async fn mid_rate(&self, pair: &CurrencyPair) -> Result<Option<Price>>;
}
