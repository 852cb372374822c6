//! Arbitrage calculator.
//!
//! Decides whether a combination of decimal odds admits a risk-free stake
//! split. With `S = sum(1 / p_i)`:
//!
//! - `S >= 1` means no arbitrage;
//! - otherwise profit is `(1 - S) * 100` percent and each leg is staked
//!   `(C / p_i) / S`, so every leg pays out exactly `C / S`.
//!
//! Everything here is a pure function of its inputs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::money::{Percent, Price, Stake};
use super::opportunity::Opportunity;
use super::quote::Leg;

/// Default notional the stakes are sized against.
pub const DEFAULT_CAPITAL: Decimal = dec!(1000);

/// Default minimum profit, in percent, for sports opportunities.
pub const DEFAULT_MIN_PROFIT_PERCENT: Decimal = dec!(1.0);

const HUNDRED: Decimal = dec!(100);

/// Outcome of evaluating one set of prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// `implied_sum < 1`: a guaranteed return exists.
    Arbitrage {
        implied_sum: Decimal,
        profit_percent: Percent,
    },
    /// `implied_sum >= 1`: a normal negative result.
    NoArbitrage { implied_sum: Decimal },
    /// Fewer than two prices, or a price that cannot be divided into.
    Invalid,
}

/// Implied probability sum as an exact fraction `(numerator, denominator)`.
///
/// `sum(1 / p_i) == sum_i(prod_{j != i} p_j) / prod_j p_j`. Decimal products
/// of quoted odds are exact, so comparing numerator and denominator decides
/// profitability without reciprocal rounding (`3 * (1 / 3)` is not below one).
/// Returns `None` if a product overflows.
fn implied_fraction(prices: &[Price]) -> Option<(Decimal, Decimal)> {
    let denominator = prices
        .iter()
        .try_fold(Decimal::ONE, |acc, &price| acc.checked_mul(price))?;
    let numerator = (0..prices.len()).try_fold(Decimal::ZERO, |acc, i| {
        let others = prices
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .try_fold(Decimal::ONE, |prod, (_, &price)| prod.checked_mul(price))?;
        acc.checked_add(others)
    })?;
    Some((numerator, denominator))
}

fn reciprocal_sum(prices: &[Price]) -> Option<Decimal> {
    prices.iter().try_fold(Decimal::ZERO, |sum, &price| {
        sum.checked_add(Decimal::ONE.checked_div(price)?)
    })
}

/// Sum of implied probabilities, or `None` if any price is not positive.
pub fn implied_probability_sum(prices: &[Price]) -> Option<Decimal> {
    if prices.iter().any(|&price| price <= Decimal::ZERO) {
        return None;
    }
    match implied_fraction(prices) {
        Some((numerator, denominator)) => numerator.checked_div(denominator),
        None => reciprocal_sum(prices),
    }
}

/// Evaluate a set of prices for arbitrage.
pub fn evaluate(prices: &[Price]) -> Evaluation {
    if prices.len() < 2 {
        return Evaluation::Invalid;
    }
    let Some(implied_sum) = implied_probability_sum(prices) else {
        return Evaluation::Invalid;
    };
    let exact_overround = implied_fraction(prices).is_some_and(|(n, d)| n >= d);
    if exact_overround || implied_sum >= Decimal::ONE {
        return Evaluation::NoArbitrage { implied_sum };
    }
    Evaluation::Arbitrage {
        implied_sum,
        profit_percent: (Decimal::ONE - implied_sum) * HUNDRED,
    }
}

/// Stake per leg so that every leg pays `capital / implied_sum`.
///
/// Returns `None` if a division overflows or `implied_sum` is zero.
pub fn stakes(prices: &[Price], capital: Decimal, implied_sum: Decimal) -> Option<Vec<Stake>> {
    prices
        .iter()
        .map(|&price| capital.checked_div(price)?.checked_div(implied_sum))
        .collect()
}

/// Turns leg combinations into opportunities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbitrageCalculator {
    capital: Decimal,
    min_profit_percent: Percent,
}

impl ArbitrageCalculator {
    /// Create a calculator sizing stakes against `capital`.
    ///
    /// Combinations whose profit is below `min_profit_percent` are rejected.
    pub const fn new(capital: Decimal, min_profit_percent: Percent) -> Self {
        Self {
            capital,
            min_profit_percent,
        }
    }

    /// Calculator reporting stakes as fractions of one unit of capital.
    pub const fn fraction(min_profit_percent: Percent) -> Self {
        Self::new(Decimal::ONE, min_profit_percent)
    }

    pub const fn capital(&self) -> Decimal {
        self.capital
    }

    pub const fn min_profit_percent(&self) -> Percent {
        self.min_profit_percent
    }

    /// Evaluate one combination, returning an opportunity if it is profitable
    /// and clears the minimum threshold.
    pub fn calculate(
        &self,
        event_label: &str,
        timestamp: Option<&str>,
        legs: Vec<Leg>,
    ) -> Option<Opportunity> {
        let prices: Vec<Price> = legs.iter().map(|leg| leg.price).collect();

        let Evaluation::Arbitrage {
            implied_sum,
            profit_percent,
        } = evaluate(&prices)
        else {
            return None;
        };

        if profit_percent < self.min_profit_percent {
            return None;
        }

        let stakes = stakes(&prices, self.capital, implied_sum)?;

        Some(Opportunity::new(
            event_label,
            timestamp.map(str::to_owned),
            legs,
            implied_sum,
            profit_percent,
            stakes,
            self.capital,
        ))
    }
}

impl Default for ArbitrageCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_CAPITAL, DEFAULT_MIN_PROFIT_PERCENT)
    }
}
