//! Implementations of ports.
//!
//! - [`odds_api`] and [`exchange_rate`] talk to live upstream APIs.
//! - [`fixture`] replays saved event documents.
//! - [`synthetic`] generates clearly labelled demo events.

pub mod exchange_rate;
pub mod fixture;
pub mod http;
pub mod odds_api;
pub mod synthetic;

pub use exchange_rate::ExchangeRateClient;
pub use fixture::{FixtureOddsSource, ALL_SPORTS};
pub use http::{HttpSettings, RetryingClient};
pub use odds_api::OddsApiClient;
pub use synthetic::{SyntheticOddsSource, SYNTHETIC_PREFIX};
