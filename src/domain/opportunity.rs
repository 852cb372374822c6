//! Detected sports arbitrage opportunity.
//!
//! Instances are produced by [`ArbitrageCalculator`](super::ArbitrageCalculator)
//! only, which guarantees the equal-payout invariant: for every leg,
//! `stake * price == capital / implied_probability_sum`.

use rust_decimal::Decimal;

use super::money::{Percent, Stake};
use super::quote::Leg;

/// A risk-free stake allocation across the legs of one combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opportunity {
    event_label: String,
    timestamp: Option<String>,
    legs: Vec<Leg>,
    implied_probability_sum: Decimal,
    profit_percent: Percent,
    stakes: Vec<Stake>,
    capital: Decimal,
}

impl Opportunity {
    pub(crate) fn new(
        event_label: impl Into<String>,
        timestamp: Option<String>,
        legs: Vec<Leg>,
        implied_probability_sum: Decimal,
        profit_percent: Percent,
        stakes: Vec<Stake>,
        capital: Decimal,
    ) -> Self {
        debug_assert_eq!(legs.len(), stakes.len());
        Self {
            event_label: event_label.into(),
            timestamp,
            legs,
            implied_probability_sum,
            profit_percent,
            stakes,
            capital,
        }
    }

    /// Get the event label.
    pub fn event_label(&self) -> &str {
        &self.event_label
    }

    /// Get the event start time, when the source supplied one.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Get the legs, in combination order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Get the sum of `1 / price` over all legs.
    pub fn implied_probability_sum(&self) -> Decimal {
        self.implied_probability_sum
    }

    /// Get the guaranteed return, `(1 - implied_sum) * 100`.
    pub fn profit_percent(&self) -> Percent {
        self.profit_percent
    }

    /// Get the stakes, one per leg in the same order.
    pub fn stakes(&self) -> &[Stake] {
        &self.stakes
    }

    /// Get the capital the stakes were sized against.
    pub fn capital(&self) -> Decimal {
        self.capital
    }

    /// Payout received whichever leg wins.
    pub fn payout(&self) -> Decimal {
        self.capital / self.implied_probability_sum
    }

    /// Iterate legs together with their stakes.
    pub fn allocations(&self) -> impl Iterator<Item = (&Leg, Stake)> {
        self.legs.iter().zip(self.stakes.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceId;
    use rust_decimal_macros::dec;

    fn leg(label: &str, price: Decimal) -> Leg {
        Leg {
            outcome_label: label.into(),
            price,
            source_id: SourceId::from("book"),
            source_url: None,
        }
    }

    #[test]
    fn payout_is_capital_over_implied_sum() {
        let opp = Opportunity::new(
            "A vs B",
            None,
            vec![leg("A", dec!(2.5)), leg("B", dec!(2.5))],
            dec!(0.8),
            dec!(20),
            vec![dec!(500), dec!(500)],
            dec!(1000),
        );

        assert_eq!(opp.payout(), dec!(1250));
        assert_eq!(opp.capital(), dec!(1000));
        assert_eq!(opp.timestamp(), None);
    }

    #[test]
    fn allocations_pair_legs_with_stakes() {
        let opp = Opportunity::new(
            "A vs B",
            Some("2026-10-20T18:00:00Z".into()),
            vec![leg("A", dec!(4)), leg("B", dec!(2))],
            dec!(0.75),
            dec!(25),
            vec![dec!(1) / dec!(3), dec!(2) / dec!(3)],
            dec!(1),
        );

        let labels: Vec<_> = opp
            .allocations()
            .map(|(leg, _)| leg.outcome_label.as_str())
            .collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert_eq!(opp.timestamp(), Some("2026-10-20T18:00:00Z"));
    }
}
