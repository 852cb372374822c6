use std::path::PathBuf;

use arbscan::domain::{EventQuoteSet, Leg, Quote, RawEvent, SourceId};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};

/// Path to the shared event fixture.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("events.json")
}

pub fn quote(label: &str, price: Decimal, source: &str) -> Quote {
    Quote::try_new(label, price, SourceId::from(source), None).expect("valid quote")
}

pub fn leg(label: &str, price: Decimal, source: &str) -> Leg {
    Leg {
        outcome_label: label.into(),
        price,
        source_id: SourceId::from(source),
        source_url: None,
    }
}

/// Legs labelled `O1`, `O2`, ... from distinct books.
pub fn legs(prices: &[Decimal]) -> Vec<Leg> {
    prices
        .iter()
        .enumerate()
        .map(|(i, price)| leg(&format!("O{}", i + 1), *price, &format!("Book {}", i + 1)))
        .collect()
}

pub fn quote_set(label: &str, quotes: Vec<Quote>) -> EventQuoteSet {
    EventQuoteSet::new(label, None, quotes)
}

/// A well-formed h2h bookmaker entry.
pub fn bookmaker(title: &str, outcomes: &[(&str, Decimal)]) -> Value {
    let outcomes: Vec<Value> = outcomes
        .iter()
        .map(|(name, price)| json!({ "name": name, "price": price.to_f64() }))
        .collect();
    json!({
        "key": title.to_lowercase(),
        "title": title,
        "markets": [{ "key": "h2h", "outcomes": outcomes }],
    })
}

pub fn event(home: &str, away: &str, bookmakers: Vec<Value>) -> RawEvent {
    RawEvent {
        home_team: Some(home.into()),
        away_team: Some(away.into()),
        bookmakers,
        ..RawEvent::default()
    }
}
