//! Source-agnostic detection engine.
//!
//! Everything in here is a pure transform over a snapshot of quotes:
//! raw event → [`OutcomeCollector`] → [`combination`] generator →
//! [`ArbitrageCalculator`] → [`Opportunity`].

mod calculator;
mod collector;
mod error;
mod ids;
mod money;
mod opportunity;
mod quote;
mod raw;

pub mod combination;
pub mod forex;

// Core domain types
pub use error::DomainError;
pub use ids::{CurrencyPair, SourceId};
pub use money::{round_to, Percent, Price, Stake};
pub use opportunity::Opportunity;
pub use quote::{EventQuoteSet, Leg, Quote};
pub use raw::{RawBookmaker, RawEvent, RawMarket, RawOutcome};

// Pipeline stages
pub use calculator::{
    evaluate, implied_probability_sum, stakes, ArbitrageCalculator, Evaluation, DEFAULT_CAPITAL,
    DEFAULT_MIN_PROFIT_PERCENT,
};
pub use collector::{Collection, OutcomeCollector, ProviderOutcome, SkipReason};
pub use combination::{
    BestPriceGenerator, CombinationGenerator, FullEnumerationGenerator, GeneratorMode,
    SlotMatching,
};
pub use forex::{detect_spread, RateQuote, RateSnapshot, SpreadOpportunity};
