//! Simulated two-exchange quotes around a mid rate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{RateQuote, RateSnapshot};
use crate::domain::ids::{CurrencyPair, SourceId};
use crate::domain::money::{round_to, Percent, Price};

/// Default simulated bid/ask width, in percent of the mid rate.
pub const DEFAULT_SPREAD_PERCENT: Decimal = dec!(0.25);

/// Default names of the two simulated exchanges.
pub const DEFAULT_EXCHANGES: [&str; 2] = ["Exchange A", "Exchange B"];

const RATE_DP: u32 = 5;

/// How the spread is placed around the mid rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Half the spread below the mid, half above.
    #[default]
    Even,
    /// Width drawn from the configured range, split point drawn from (0, 1).
    Random,
}

/// Synthesizes one quote per exchange from a fetched mid rate.
#[derive(Debug, Clone)]
pub struct SpreadSimulator {
    exchanges: [SourceId; 2],
    spread_min_percent: Percent,
    spread_max_percent: Percent,
    split: SplitMode,
    rng: StdRng,
}

impl SpreadSimulator {
    /// Create a simulator. Pass a seed for reproducible random splits.
    pub fn new(
        exchanges: [SourceId; 2],
        spread_min_percent: Percent,
        spread_max_percent: Percent,
        split: SplitMode,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            exchanges,
            spread_min_percent,
            spread_max_percent,
            split,
            rng,
        }
    }

    pub fn exchanges(&self) -> &[SourceId; 2] {
        &self.exchanges
    }

    /// Build a two-quote snapshot around `mid`; the lower rate goes to the
    /// first exchange in even mode.
    pub fn simulate(&mut self, pair: CurrencyPair, mid: Price) -> RateSnapshot {
        let (low, high, swap) = match self.split {
            SplitMode::Even => {
                let width = (self.spread_min_percent + self.spread_max_percent) / dec!(2);
                let spread = mid * width / dec!(100);
                (mid - spread / dec!(2), mid + spread / dec!(2), false)
            }
            SplitMode::Random => {
                let width = self.random_width();
                let spread = mid * width / dec!(100);
                let point = self.unit_interval();
                let swap = self.rng.gen_bool(0.5);
                (
                    mid - spread * point,
                    mid + spread * (Decimal::ONE - point),
                    swap,
                )
            }
        };

        let (first, second) = if swap { (high, low) } else { (low, high) };
        RateSnapshot {
            pair,
            quotes: vec![
                RateQuote::new(self.exchanges[0].clone(), round_to(first, RATE_DP)),
                RateQuote::new(self.exchanges[1].clone(), round_to(second, RATE_DP)),
            ],
        }
    }

    fn random_width(&mut self) -> Percent {
        if self.spread_max_percent <= self.spread_min_percent {
            return self.spread_min_percent;
        }
        let range = self.spread_max_percent - self.spread_min_percent;
        self.spread_min_percent + range * self.unit_interval()
    }

    /// A draw from the open interval (0, 1).
    fn unit_interval(&mut self) -> Decimal {
        let draw: f64 = self.rng.gen_range(f64::EPSILON..1.0);
        Decimal::try_from(draw)
            .map(|d| d.round_dp(8))
            .unwrap_or(dec!(0.5))
    }
}

impl Default for SpreadSimulator {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCHANGES.map(SourceId::from),
            DEFAULT_SPREAD_PERCENT,
            DEFAULT_SPREAD_PERCENT,
            SplitMode::Even,
            None,
        )
    }
}
