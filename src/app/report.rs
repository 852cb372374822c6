//! Report records shaped from engine output.
//!
//! This is the only place values are rounded: money and percentages to two
//! places, exchange rates to five.

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::domain::{round_to, Opportunity, SpreadOpportunity};

const MONEY_DP: u32 = 2;
const RATE_DP: u32 = 5;
const PROBABILITY_DP: u32 = 4;

/// One leg of a reported opportunity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegRecord {
    pub outcome: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub stake: Decimal,
}

/// A sports opportunity ready for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityRecord {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commence_time: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub implied_probability_sum: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub capital: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub payout: Decimal,
    pub synthetic: bool,
    pub legs: Vec<LegRecord>,
}

impl OpportunityRecord {
    pub fn new(opportunity: &Opportunity, synthetic: bool) -> Self {
        Self {
            event: opportunity.event_label().to_string(),
            commence_time: opportunity.timestamp().map(str::to_owned),
            profit_percent: round_to(opportunity.profit_percent(), MONEY_DP),
            implied_probability_sum: round_to(
                opportunity.implied_probability_sum(),
                PROBABILITY_DP,
            ),
            capital: opportunity.capital(),
            payout: round_to(opportunity.payout(), MONEY_DP),
            synthetic,
            legs: opportunity
                .allocations()
                .map(|(leg, stake)| LegRecord {
                    outcome: leg.outcome_label.clone(),
                    price: leg.price,
                    source: leg.source_id.to_string(),
                    url: leg.source_url.clone(),
                    stake: round_to(stake, MONEY_DP),
                })
                .collect(),
        }
    }
}

/// Table row for a sports opportunity.
#[derive(Debug, Clone, Tabled)]
pub struct OpportunityRow {
    #[tabled(rename = "Match")]
    pub event: String,
    #[tabled(rename = "Profit %")]
    pub profit_percent: Decimal,
    #[tabled(rename = "Stakes")]
    pub stakes: String,
    #[tabled(rename = "Outcomes & Odds")]
    pub legs: String,
}

impl From<&OpportunityRecord> for OpportunityRow {
    fn from(record: &OpportunityRecord) -> Self {
        Self {
            event: record.event.clone(),
            profit_percent: record.profit_percent,
            stakes: record
                .legs
                .iter()
                .map(|leg| format!("{:.2}", leg.stake))
                .collect::<Vec<_>>()
                .join(" / "),
            legs: record
                .legs
                .iter()
                .map(|leg| format!("{} @ {:.2} ({})", leg.outcome, leg.price, leg.source))
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}

/// A forex spread ready for output.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct SpreadRow {
    #[tabled(rename = "Currency Pair")]
    pub pair: String,
    #[tabled(rename = "Buy From")]
    pub buy_from: String,
    #[tabled(rename = "Sell To")]
    pub sell_to: String,
    #[tabled(rename = "Buy Rate")]
    #[serde(with = "rust_decimal::serde::float")]
    pub buy_rate: Decimal,
    #[tabled(rename = "Sell Rate")]
    #[serde(with = "rust_decimal::serde::float")]
    pub sell_rate: Decimal,
    #[tabled(rename = "Profit %")]
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_percent: Decimal,
}

impl From<&SpreadOpportunity> for SpreadRow {
    fn from(opportunity: &SpreadOpportunity) -> Self {
        Self {
            pair: opportunity.pair().to_string(),
            buy_from: opportunity.buy_from().to_string(),
            sell_to: opportunity.sell_to().to_string(),
            buy_rate: round_to(opportunity.buy_rate(), RATE_DP),
            sell_rate: round_to(opportunity.sell_rate(), RATE_DP),
            profit_percent: round_to(opportunity.profit_percent(), MONEY_DP),
        }
    }
}
