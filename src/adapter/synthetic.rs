//! Generated demo events.
//!
//! Every event label is prefixed with [`SYNTHETIC_PREFIX`] and the source
//! reports itself as synthetic, so generated opportunities can never be
//! mistaken for real ones.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde_json::json;

use crate::domain::RawEvent;
use crate::error::Result;
use crate::port::OddsSource;

/// Prefix carried by every generated event label.
pub const SYNTHETIC_PREFIX: &str = "[synthetic]";

const TEAMS: [&str; 8] = [
    "Harbor City", "Northvale", "Red Mesa", "Ironbridge", "Lakeshore", "Summit", "Eastport",
    "Granite Falls",
];

const BOOKMAKERS: [&str; 4] = ["DemoBook One", "DemoBook Two", "DemoBook Three", "DemoBook Four"];

/// Random two-way events quoted by a handful of demo bookmakers.
#[derive(Debug)]
pub struct SyntheticOddsSource {
    events_per_sport: usize,
    rng: Mutex<StdRng>,
}

impl SyntheticOddsSource {
    /// Create a source; a seed makes the generated events reproducible.
    pub fn new(events_per_sport: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            events_per_sport,
            rng: Mutex::new(rng),
        }
    }

    fn generate(&self, rng: &mut StdRng, sport: &str) -> Vec<RawEvent> {
        (0..self.events_per_sport)
            .map(|i| {
                let teams: Vec<&str> = TEAMS.choose_multiple(rng, 2).copied().collect();
                let home = format!("{SYNTHETIC_PREFIX} {}", teams[0]);
                let away = teams[1].to_string();

                let books = rng.gen_range(2..=BOOKMAKERS.len());
                let bookmakers = BOOKMAKERS[..books]
                    .iter()
                    .map(|title| {
                        json!({
                            "key": title.to_lowercase().replace(' ', "_"),
                            "title": title,
                            "markets": [{
                                "key": "h2h",
                                "outcomes": [
                                    { "name": home, "price": random_price(rng) },
                                    { "name": away, "price": random_price(rng) },
                                ],
                            }],
                        })
                    })
                    .collect();

                RawEvent {
                    id: Some(format!("synthetic-{sport}-{i}")),
                    sport_key: Some(sport.to_string()),
                    home_team: Some(home),
                    away_team: Some(away),
                    bookmakers,
                    ..RawEvent::default()
                }
            })
            .collect()
    }
}

/// Decimal odds between 1.60 and 2.60, two places.
fn random_price(rng: &mut StdRng) -> Decimal {
    Decimal::new(rng.gen_range(160..=260), 2)
}

#[async_trait]
impl OddsSource for SyntheticOddsSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn is_synthetic(&self) -> bool {
        true
    }

    async fn fetch_events(&self, sport: &str) -> Result<Vec<RawEvent>> {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(self.generate(&mut rng, sport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_label_is_marked_synthetic() {
        let source = SyntheticOddsSource::new(5, Some(1));
        let events = source.fetch_events("soccer_epl").await.unwrap();

        assert_eq!(events.len(), 5);
        assert!(source.is_synthetic());
        for event in &events {
            assert!(event.label().starts_with(SYNTHETIC_PREFIX), "{}", event.label());
            assert!(event.bookmakers.len() >= 2);
        }
    }

    #[tokio::test]
    async fn seeded_sources_agree() {
        let a = SyntheticOddsSource::new(3, Some(9)).fetch_events("x").await.unwrap();
        let b = SyntheticOddsSource::new(3, Some(9)).fetch_events("x").await.unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn prices_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let price = random_price(&mut rng);
            assert!(price >= Decimal::new(160, 2) && price <= Decimal::new(260, 2));
        }
    }
}
