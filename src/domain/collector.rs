//! Outcome collector.
//!
//! Flattens one raw event into an [`EventQuoteSet`]. Each provider entry is
//! decoded independently and yields a [`ProviderOutcome`]; a malformed entry
//! is skipped with a reason and never aborts the rest of the event.

use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::error::DomainError;
use super::ids::SourceId;
use super::quote::{EventQuoteSet, Quote};
use super::raw::{RawBookmaker, RawEvent, RawMarket};

/// Why a provider entry contributed no quotes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("malformed provider entry: {0}")]
    Malformed(String),

    #[error("no '{0}' market offered")]
    MissingMarket(String),

    #[error("market has no outcomes")]
    NoOutcomes,

    #[error("missing price for outcome '{0}'")]
    MissingPrice(String),

    #[error("invalid price for outcome '{0}'")]
    InvalidPrice(String),
}

/// Result of collecting quotes from a single provider entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// The provider's quotes were extracted.
    Collected { source: SourceId, quotes: Vec<Quote> },
    /// The provider was dropped; `source` is known when the entry had a name.
    Skipped {
        source: Option<SourceId>,
        reason: SkipReason,
    },
}

impl ProviderOutcome {
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Everything the collector learned about one event.
#[derive(Debug, Clone)]
pub struct Collection {
    pub quote_set: EventQuoteSet,
    pub providers: Vec<ProviderOutcome>,
}

impl Collection {
    /// Providers that were dropped, with their reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (Option<&SourceId>, &SkipReason)> {
        self.providers.iter().filter_map(|p| match p {
            ProviderOutcome::Skipped { source, reason } => Some((source.as_ref(), reason)),
            ProviderOutcome::Collected { .. } => None,
        })
    }

    pub fn skipped_count(&self) -> usize {
        self.providers.iter().filter(|p| p.is_skipped()).count()
    }
}

/// Normalizes raw provider entries into flat quote lists.
#[derive(Debug, Clone)]
pub struct OutcomeCollector {
    market_key: String,
    outcomes_per_provider: Option<usize>,
}

impl OutcomeCollector {
    /// Create a collector for the given market key (e.g. `h2h`).
    ///
    /// An empty key selects each provider's first market. When
    /// `outcomes_per_provider` is set only that many leading outcomes are read.
    pub fn new(market_key: impl Into<String>, outcomes_per_provider: Option<usize>) -> Self {
        Self {
            market_key: market_key.into(),
            outcomes_per_provider,
        }
    }

    pub fn market_key(&self) -> &str {
        &self.market_key
    }

    /// Collect every provider's quotes for one event.
    pub fn collect(&self, event: &RawEvent) -> Collection {
        let label = event.label();
        let providers: Vec<ProviderOutcome> = event
            .bookmakers
            .iter()
            .map(|entry| self.collect_provider(entry))
            .collect();

        let mut groups = Vec::new();
        for provider in &providers {
            match provider {
                ProviderOutcome::Collected { quotes, .. } => groups.push(quotes.clone()),
                ProviderOutcome::Skipped { source, reason } => {
                    debug!(
                        event = %label,
                        source = source.as_ref().map_or("<unnamed>", SourceId::as_str),
                        reason = %reason,
                        "Skipping provider"
                    );
                }
            }
        }

        Collection {
            quote_set: EventQuoteSet::from_providers(label, event.commence_time.clone(), groups),
            providers,
        }
    }

    /// Collect quotes from a single raw provider entry.
    pub fn collect_provider(&self, entry: &Value) -> ProviderOutcome {
        let fallback_source = entry
            .get("title")
            .or_else(|| entry.get("key"))
            .and_then(Value::as_str)
            .map(SourceId::from);

        let bookmaker: RawBookmaker = match serde_json::from_value(entry.clone()) {
            Ok(bookmaker) => bookmaker,
            Err(err) => {
                return ProviderOutcome::Skipped {
                    source: fallback_source,
                    reason: SkipReason::Malformed(err.to_string()),
                }
            }
        };

        let Some(name) = bookmaker.name() else {
            return ProviderOutcome::Skipped {
                source: None,
                reason: SkipReason::Malformed("provider has no title".into()),
            };
        };
        let source = SourceId::from(name);

        match self.extract_quotes(&bookmaker, &source) {
            Ok(quotes) => ProviderOutcome::Collected { source, quotes },
            Err(reason) => ProviderOutcome::Skipped {
                source: Some(source),
                reason,
            },
        }
    }

    fn find_market<'a>(&self, bookmaker: &'a RawBookmaker) -> Option<&'a RawMarket> {
        if self.market_key.is_empty() {
            return bookmaker.markets.first();
        }
        bookmaker.markets.iter().find(|m| m.key == self.market_key)
    }

    fn extract_quotes(
        &self,
        bookmaker: &RawBookmaker,
        source: &SourceId,
    ) -> Result<Vec<Quote>, SkipReason> {
        let market = self
            .find_market(bookmaker)
            .ok_or_else(|| SkipReason::MissingMarket(self.market_key.clone()))?;

        if market.outcomes.is_empty() {
            return Err(SkipReason::NoOutcomes);
        }

        let limit = self.outcomes_per_provider.unwrap_or(usize::MAX);
        market
            .outcomes
            .iter()
            .take(limit)
            .map(|outcome| {
                let price = outcome
                    .price
                    .ok_or_else(|| SkipReason::MissingPrice(outcome.name.clone()))?;
                if price <= Decimal::ZERO {
                    return Err(SkipReason::InvalidPrice(outcome.name.clone()));
                }
                Quote::try_new(
                    outcome.name.clone(),
                    price,
                    source.clone(),
                    bookmaker.url.clone(),
                )
                .map_err(|err| match err {
                    DomainError::EmptyLabel => SkipReason::Malformed(err.to_string()),
                    DomainError::NonPositivePrice { .. } => {
                        SkipReason::InvalidPrice(outcome.name.clone())
                    }
                })
            })
            .collect()
    }
}

impl Default for OutcomeCollector {
    fn default() -> Self {
        Self::new("h2h", None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn bookmaker(title: &str, outcomes: Value) -> Value {
        json!({
            "key": title.to_lowercase(),
            "title": title,
            "url": format!("https://{}.example", title.to_lowercase()),
            "markets": [{ "key": "h2h", "outcomes": outcomes }],
        })
    }

    fn event(bookmakers: Vec<Value>) -> RawEvent {
        RawEvent {
            home_team: Some("Lakers".into()),
            away_team: Some("Celtics".into()),
            commence_time: Some("2026-10-20T00:00:00Z".into()),
            bookmakers,
            ..Default::default()
        }
    }

    #[test]
    fn collects_all_outcomes_in_order() {
        let collector = OutcomeCollector::default();
        let raw = event(vec![
            bookmaker(
                "Alpha",
                json!([{ "name": "Lakers", "price": 2.12 }, { "name": "Celtics", "price": 1.75 }]),
            ),
            bookmaker(
                "Beta",
                json!([{ "name": "Lakers", "price": 1.9 }, { "name": "Celtics", "price": 2.08 }]),
            ),
        ]);

        let collection = collector.collect(&raw);
        let set = &collection.quote_set;

        assert_eq!(set.event_label(), "Lakers vs Celtics");
        assert_eq!(set.timestamp(), Some("2026-10-20T00:00:00Z"));
        assert_eq!(set.len(), 4);
        assert_eq!(set.quotes()[0].price(), dec!(2.12));
        assert_eq!(set.quotes()[3].source_id().as_str(), "Beta");
        assert_eq!(set.quotes()[3].source_url(), Some("https://beta.example"));
        assert_eq!(collection.skipped_count(), 0);
    }

    #[test]
    fn missing_price_skips_only_that_provider() {
        let collector = OutcomeCollector::default();
        let raw = event(vec![
            bookmaker(
                "Alpha",
                json!([{ "name": "Lakers" }, { "name": "Celtics", "price": 1.75 }]),
            ),
            bookmaker(
                "Beta",
                json!([{ "name": "Lakers", "price": 1.9 }, { "name": "Celtics", "price": 2.08 }]),
            ),
        ]);

        let collection = collector.collect(&raw);

        assert_eq!(collection.quote_set.len(), 2);
        let skipped: Vec<_> = collection.skipped().collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0.map(SourceId::as_str), Some("Alpha"));
        assert_eq!(skipped[0].1, &SkipReason::MissingPrice("Lakers".into()));
    }

    #[test]
    fn wrong_types_are_reported_as_malformed() {
        let collector = OutcomeCollector::default();
        let outcome = collector.collect_provider(&json!({
            "title": "Gamma",
            "markets": "not-a-list",
        }));

        match outcome {
            ProviderOutcome::Skipped {
                source: Some(source),
                reason: SkipReason::Malformed(_),
            } => assert_eq!(source.as_str(), "Gamma"),
            other => panic!("expected malformed skip, got {other:?}"),
        }
    }

    #[test]
    fn provider_without_matching_market_is_skipped() {
        let collector = OutcomeCollector::new("spreads", None);
        let outcome = collector.collect_provider(&bookmaker(
            "Alpha",
            json!([{ "name": "Lakers", "price": 2.0 }]),
        ));

        assert_eq!(
            outcome,
            ProviderOutcome::Skipped {
                source: Some(SourceId::from("Alpha")),
                reason: SkipReason::MissingMarket("spreads".into()),
            }
        );
    }

    #[test]
    fn empty_market_key_uses_first_market() {
        let collector = OutcomeCollector::new("", None);
        let entry = json!({
            "title": "Alpha",
            "markets": [
                { "key": "totals", "outcomes": [{ "name": "Over", "price": 1.9 }] },
                { "key": "h2h", "outcomes": [{ "name": "Lakers", "price": 2.0 }] },
            ],
        });

        match collector.collect_provider(&entry) {
            ProviderOutcome::Collected { quotes, .. } => {
                assert_eq!(quotes.len(), 1);
                assert_eq!(quotes[0].outcome_label(), "Over");
            }
            other => panic!("expected quotes, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_price_is_invalid() {
        let collector = OutcomeCollector::default();
        let outcome = collector.collect_provider(&bookmaker(
            "Alpha",
            json!([{ "name": "Lakers", "price": 0 }, { "name": "Celtics", "price": 2.0 }]),
        ));

        assert_eq!(
            outcome,
            ProviderOutcome::Skipped {
                source: Some(SourceId::from("Alpha")),
                reason: SkipReason::InvalidPrice("Lakers".into()),
            }
        );
    }

    #[test]
    fn outcome_limit_reads_leading_outcomes_only() {
        let collector = OutcomeCollector::new("h2h", Some(2));
        let outcome = collector.collect_provider(&bookmaker(
            "Alpha",
            json!([
                { "name": "Home", "price": 2.5 },
                { "name": "Away", "price": 2.9 },
                { "name": "Draw", "price": 3.1 },
            ]),
        ));

        match outcome {
            ProviderOutcome::Collected { quotes, .. } => {
                let labels: Vec<_> = quotes.iter().map(Quote::outcome_label).collect();
                assert_eq!(labels, vec!["Home", "Away"]);
            }
            other => panic!("expected quotes, got {other:?}"),
        }
    }

    #[test]
    fn blank_outcome_name_is_malformed() {
        let collector = OutcomeCollector::default();
        let outcome = collector.collect_provider(&bookmaker(
            "Alpha",
            json!([{ "name": "  ", "price": 2.1 }, { "name": "Celtics", "price": 2.0 }]),
        ));

        assert!(matches!(
            outcome,
            ProviderOutcome::Skipped {
                reason: SkipReason::Malformed(_),
                ..
            }
        ));
    }

    #[test]
    fn same_titled_providers_keep_their_own_groups() {
        let collector = OutcomeCollector::default();
        let raw = event(vec![
            bookmaker(
                "Alpha",
                json!([{ "name": "Lakers", "price": 1.5 }, { "name": "Celtics", "price": 2.0 }]),
            ),
            bookmaker(
                "Alpha",
                json!([{ "name": "Lakers", "price": 2.4 }, { "name": "Celtics", "price": 2.5 }]),
            ),
        ]);

        let collection = collector.collect(&raw);
        let groups = collection.quote_set.provider_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1][0].price(), dec!(2.4));
    }

    #[test]
    fn empty_outcome_list_is_skipped() {
        let collector = OutcomeCollector::default();
        let outcome = collector.collect_provider(&bookmaker("Alpha", json!([])));
        assert!(matches!(
            outcome,
            ProviderOutcome::Skipped {
                reason: SkipReason::NoOutcomes,
                ..
            }
        ));
    }
}
