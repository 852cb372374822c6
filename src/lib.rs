//! Arbscan - sports odds and forex spread arbitrage detection.
//!
//! Quotes for the same event are gathered from several providers, combined
//! into candidate bets, and kept when the implied probabilities sum below
//! one. Forex pairs are quoted by two simulated exchanges and kept when the
//! spread leaves a profit.
//!
//! # Architecture
//!
//! - **`domain`** - Pure engine: collector, combination generators,
//!   arbitrage calculator, forex spread detection
//!   - `FullEnumerationGenerator` - every combination of 2..=4 quotes
//!   - `BestPriceGenerator` - best price per outcome slot
//! - **`port`** - `OddsSource` and `RateSource` traits
//! - **`adapter`** - The Odds API, exchangerate.host, fixture files, and
//!   synthetic demo events
//! - **`app`** - Scanners that run the engine over ports, report records,
//!   and watch sessions
//! - **`cli`** - Command-line front end
//!
//! # Example
//!
//! ```
//! use arbscan::domain::{ArbitrageCalculator, Leg, SourceId};
//! use rust_decimal_macros::dec;
//!
//! let legs = vec![
//!     Leg { outcome_label: "Lakers".into(), price: dec!(2.12), source_id: SourceId::from("Alpha"), source_url: None },
//!     Leg { outcome_label: "Celtics".into(), price: dec!(2.08), source_id: SourceId::from("Beta"), source_url: None },
//! ];
//! let calculator = ArbitrageCalculator::new(dec!(1000), dec!(1));
//! let opportunity = calculator.calculate("Lakers vs Celtics", None, legs).unwrap();
//! assert!(opportunity.profit_percent() > dec!(4.7));
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{Error, Result};
