//! Monetary types for price, stake and percentage representation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal odds or exchange rate.
pub type Price = Decimal;

/// Amount of capital placed on one leg.
pub type Stake = Decimal;

/// Percentage value (4.75 means 4.75%).
pub type Percent = Decimal;

/// Round half away from zero to `dp` decimal places.
///
/// Only used at the reporting boundary; calculations keep full precision.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_and_stake_are_decimal() {
        let price: Price = dec!(2.10);
        let stake: Stake = dec!(100.0);

        assert_eq!(price * stake, dec!(210.000));
    }

    #[test]
    fn round_to_goes_away_from_zero_on_midpoint() {
        assert_eq!(round_to(dec!(4.745), 2), dec!(4.75));
        assert_eq!(round_to(dec!(4.7449), 2), dec!(4.74));
        assert_eq!(round_to(dec!(1.234565), 5), dec!(1.23457));
    }
}
