//! Raw event documents as supplied by quote providers.
//!
//! The shape follows The Odds API v4 `/odds` response. Provider entries are
//! kept as untyped JSON so that each one is decoded, and rejected, on its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const UNKNOWN_EVENT: &str = "Unknown Match";

/// One match or instrument with the quotes every provider offers for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commence_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<String>>,
    #[serde(default)]
    pub bookmakers: Vec<serde_json::Value>,
}

impl RawEvent {
    /// Human-readable event label, e.g. `"Lakers vs Celtics"`.
    pub fn label(&self) -> String {
        if let Some(teams) = self.teams.as_ref().filter(|t| !t.is_empty()) {
            return teams.join(" vs ");
        }
        match (&self.home_team, &self.away_team) {
            (Some(home), Some(away)) => format!("{home} vs {away}"),
            (Some(team), None) | (None, Some(team)) => team.clone(),
            (None, None) => UNKNOWN_EVENT.to_string(),
        }
    }
}

/// A provider entry inside [`RawEvent::bookmakers`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBookmaker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub markets: Vec<RawMarket>,
}

impl RawBookmaker {
    /// Display name of the provider, preferring the title over the key.
    pub fn name(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.key.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}

/// One market (e.g. `h2h`) offered by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMarket {
    #[serde(default)]
    pub key: String,
    pub outcomes: Vec<RawOutcome>,
}

/// One outcome with its decimal price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOutcome {
    pub name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_prefers_teams_list() {
        let event: RawEvent = serde_json::from_value(json!({
            "teams": ["Arsenal", "Chelsea"],
            "home_team": "ignored",
            "away_team": "ignored",
        }))
        .unwrap();
        assert_eq!(event.label(), "Arsenal vs Chelsea");
    }

    #[test]
    fn label_falls_back_to_home_and_away() {
        let event: RawEvent = serde_json::from_value(json!({
            "home_team": "Lakers",
            "away_team": "Celtics",
        }))
        .unwrap();
        assert_eq!(event.label(), "Lakers vs Celtics");
    }

    #[test]
    fn label_defaults_to_unknown_match() {
        assert_eq!(RawEvent::default().label(), "Unknown Match");
    }

    #[test]
    fn outcome_price_decodes_from_json_number() {
        let outcome: RawOutcome =
            serde_json::from_value(json!({ "name": "Draw", "price": 3.25 })).unwrap();
        assert_eq!(outcome.price, Some(Decimal::new(325, 2)));
    }

    #[test]
    fn bookmaker_name_falls_back_to_key() {
        let bookmaker: RawBookmaker =
            serde_json::from_value(json!({ "key": "unibet", "markets": [] })).unwrap();
        assert_eq!(bookmaker.name(), Some("unibet"));
    }
}
