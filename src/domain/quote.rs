//! Normalized quotes and candidate legs.

use super::error::DomainError;
use super::ids::SourceId;
use super::money::Price;

/// One priced outcome offered by one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    outcome_label: String,
    price: Price,
    source_id: SourceId,
    source_url: Option<String>,
}

impl Quote {
    /// Create a validated quote.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyLabel`] for a blank outcome label and
    /// [`DomainError::NonPositivePrice`] for a price that is zero or negative.
    pub fn try_new(
        outcome_label: impl Into<String>,
        price: Price,
        source_id: SourceId,
        source_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let outcome_label = outcome_label.into();
        if outcome_label.trim().is_empty() {
            return Err(DomainError::EmptyLabel);
        }
        if price <= Price::ZERO {
            return Err(DomainError::NonPositivePrice {
                outcome: outcome_label,
                price,
            });
        }
        Ok(Self {
            outcome_label,
            price,
            source_id,
            source_url,
        })
    }

    pub fn outcome_label(&self) -> &str {
        &self.outcome_label
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }
}

/// All quotes collected for one event, in collection order.
///
/// Quotes from the same provider are contiguous and the provider boundaries
/// are kept, so two entries sharing a title stay separate providers. Built
/// once per raw event and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuoteSet {
    event_label: String,
    timestamp: Option<String>,
    quotes: Vec<Quote>,
    provider_ends: Vec<usize>,
}

impl EventQuoteSet {
    /// Build a set from a flat quote list.
    ///
    /// Each maximal run of consecutive quotes sharing a source id is taken
    /// as one provider. Use [`EventQuoteSet::from_providers`] when the
    /// provider boundaries are known.
    pub fn new(event_label: impl Into<String>, timestamp: Option<String>, quotes: Vec<Quote>) -> Self {
        let mut provider_ends = Vec::new();
        for i in 1..=quotes.len() {
            if i == quotes.len() || quotes[i].source_id != quotes[i - 1].source_id {
                provider_ends.push(i);
            }
        }
        Self {
            event_label: event_label.into(),
            timestamp,
            quotes,
            provider_ends,
        }
    }

    /// Build a set from per-provider quote lists, one list per provider entry.
    ///
    /// Empty lists contribute no group.
    pub fn from_providers(
        event_label: impl Into<String>,
        timestamp: Option<String>,
        providers: impl IntoIterator<Item = Vec<Quote>>,
    ) -> Self {
        let mut quotes = Vec::new();
        let mut provider_ends = Vec::new();
        for provider in providers {
            if provider.is_empty() {
                continue;
            }
            quotes.extend(provider);
            provider_ends.push(quotes.len());
        }
        Self {
            event_label: event_label.into(),
            timestamp,
            quotes,
            provider_ends,
        }
    }

    pub fn event_label(&self) -> &str {
        &self.event_label
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Quotes grouped per provider, preserving provider and outcome order.
    pub fn provider_groups(&self) -> Vec<&[Quote]> {
        let mut start = 0;
        self.provider_ends
            .iter()
            .map(|&end| {
                let group = &self.quotes[start..end];
                start = end;
                group
            })
            .collect()
    }

    /// Distinct outcome labels in first-seen order.
    pub fn outcome_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for quote in &self.quotes {
            if !labels.contains(&quote.outcome_label()) {
                labels.push(quote.outcome_label());
            }
        }
        labels
    }
}

/// One element of a candidate arbitrage combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    /// Outcome the stake is placed on.
    pub outcome_label: String,
    /// Decimal odds for that outcome.
    pub price: Price,
    /// Provider offering the price.
    pub source_id: SourceId,
    /// Link to the provider, when known.
    pub source_url: Option<String>,
}

impl From<&Quote> for Leg {
    fn from(quote: &Quote) -> Self {
        Self {
            outcome_label: quote.outcome_label.clone(),
            price: quote.price,
            source_id: quote.source_id.clone(),
            source_url: quote.source_url.clone(),
        }
    }
}
