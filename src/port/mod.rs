//! Trait definitions for quote collaborators. Depend only on domain.
//!
//! The engine never talks to the network; adapters implementing these
//! traits feed it raw documents and mid rates.
//!
//! # Available Ports
//!
//! - [`OddsSource`] - Raw sports events with per-bookmaker odds
//! - [`RateSource`] - Currency listings and mid rates

mod source;

pub use source::{OddsSource, RateSource};
