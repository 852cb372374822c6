//! Forex spread detection.
//!
//! The two-leg specialization of the calculator: given one rate per source
//! for a currency pair, buy where the rate is lowest and sell where it is
//! highest.

mod simulator;

pub use simulator::{SplitMode, SpreadSimulator, DEFAULT_EXCHANGES, DEFAULT_SPREAD_PERCENT};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ids::{CurrencyPair, SourceId};
use super::money::{Percent, Price};

/// Default minimum profit, in percent, for forex spreads.
pub const DEFAULT_FOREX_MIN_PROFIT_PERCENT: Decimal = dec!(0.1);

/// Currencies scanned when no listing is available.
pub const FALLBACK_CURRENCIES: [&str; 5] = ["USD", "EUR", "GBP", "INR", "JPY"];

/// One source's rate for a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateQuote {
    pub source_id: SourceId,
    pub rate: Price,
}

impl RateQuote {
    pub fn new(source_id: impl Into<SourceId>, rate: Price) -> Self {
        Self {
            source_id: source_id.into(),
            rate,
        }
    }
}

/// Rates for one pair across sources, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSnapshot {
    pub pair: CurrencyPair,
    pub quotes: Vec<RateQuote>,
}

/// A buy-low, sell-high spread between two sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadOpportunity {
    pair: CurrencyPair,
    buy_from: SourceId,
    sell_to: SourceId,
    buy_rate: Price,
    sell_rate: Price,
    profit_percent: Percent,
}

impl SpreadOpportunity {
    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    /// Source quoting the lowest rate.
    pub fn buy_from(&self) -> &SourceId {
        &self.buy_from
    }

    /// Source quoting the highest rate.
    pub fn sell_to(&self) -> &SourceId {
        &self.sell_to
    }

    pub fn buy_rate(&self) -> Price {
        self.buy_rate
    }

    pub fn sell_rate(&self) -> Price {
        self.sell_rate
    }

    /// `(sell - buy) / buy * 100`.
    pub fn profit_percent(&self) -> Percent {
        self.profit_percent
    }
}

/// Detect a spread in one snapshot.
///
/// Returns `None` for fewer than two quotes, when the highest rate does not
/// exceed the lowest, or when the profit is not strictly above
/// `min_profit_percent`. Ties keep the first source seen.
pub fn detect_spread(snapshot: &RateSnapshot, min_profit_percent: Percent) -> Option<SpreadOpportunity> {
    if snapshot.quotes.len() < 2 {
        return None;
    }

    let mut buy = &snapshot.quotes[0];
    let mut sell = &snapshot.quotes[0];
    for quote in &snapshot.quotes[1..] {
        if quote.rate < buy.rate {
            buy = quote;
        }
        if quote.rate > sell.rate {
            sell = quote;
        }
    }

    if sell.rate <= buy.rate || buy.rate <= Decimal::ZERO {
        return None;
    }

    let profit_percent = (sell.rate - buy.rate) / buy.rate * dec!(100);
    if profit_percent <= min_profit_percent {
        return None;
    }

    Some(SpreadOpportunity {
        pair: snapshot.pair.clone(),
        buy_from: buy.source_id.clone(),
        sell_to: sell.source_id.clone(),
        buy_rate: buy.rate,
        sell_rate: sell.rate,
        profit_percent,
    })
}

/// Ordered pairs of distinct currencies, in list order, capped at `max_pairs`.
pub fn currency_pairs<S: AsRef<str>>(currencies: &[S], max_pairs: usize) -> Vec<CurrencyPair> {
    currencies
        .iter()
        .flat_map(|base| {
            currencies
                .iter()
                .filter(move |quote| quote.as_ref() != base.as_ref())
                .map(move |quote| CurrencyPair::new(base.as_ref(), quote.as_ref()))
        })
        .take(max_pairs)
        .collect()
}
