//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate inputs.
//!
//! # Examples
//!
//! ```
//! use arbscan::domain::DomainError;
//! use arbscan::domain::{Quote, SourceId};
//! use rust_decimal_macros::dec;
//!
//! let result = Quote::try_new("Draw", dec!(0), SourceId::new("bet365"), None);
//! assert!(matches!(result, Err(DomainError::NonPositivePrice { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Prices are divided into, so they must be strictly positive.
    #[error("price for '{outcome}' must be positive, got {price}")]
    NonPositivePrice {
        /// Outcome the price was quoted for.
        outcome: String,
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },

    /// Outcome labels identify a leg and cannot be blank.
    #[error("outcome label cannot be empty")]
    EmptyLabel,
}
