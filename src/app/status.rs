//! Upstream availability for one fetch.

use serde::Serialize;

/// Whether a source answered.
///
/// `Ok` with zero opportunities means "nothing found"; `Unavailable` means
/// the result set is empty because the source could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Ok,
    Unavailable { reason: String },
}

impl SourceStatus {
    pub fn unavailable(reason: impl ToString) -> Self {
        Self::Unavailable {
            reason: reason.to_string(),
        }
    }

    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ok => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}
