//! Odds source backed by a JSON file.
//!
//! The file holds an array of raw events in The Odds API shape, as saved
//! from a live response. Used for offline scans and tests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::RawEvent;
use crate::error::Result;
use crate::port::OddsSource;

/// Sport key matching every event, as in The Odds API.
pub const ALL_SPORTS: &str = "upcoming";

/// Reads events from a file on every fetch.
#[derive(Debug, Clone)]
pub struct FixtureOddsSource {
    path: PathBuf,
    name: String,
}

impl FixtureOddsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("fixture:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a fixture document.
    pub fn parse(content: &str) -> Result<Vec<RawEvent>> {
        Ok(serde_json::from_str(content)?)
    }
}

fn matches_sport(event: &RawEvent, sport: &str) -> bool {
    sport == ALL_SPORTS || event.sport_key.as_deref().map_or(true, |key| key == sport)
}

#[async_trait]
impl OddsSource for FixtureOddsSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_events(&self, sport: &str) -> Result<Vec<RawEvent>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let events: Vec<RawEvent> = Self::parse(&content)?
            .into_iter()
            .filter(|event| matches_sport(event, sport))
            .collect();
        debug!(path = %self.path.display(), sport, count = events.len(), "Loaded fixture events");
        Ok(events)
    }
}
