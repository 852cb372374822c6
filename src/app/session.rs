//! Per-session state for repeated scans.
//!
//! A [`Session`] is owned by whoever drives the scans (the `watch` command)
//! and dropped when it ends. Nothing here is shared between sessions.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::report::OpportunityRecord;
use super::sports::SportsReport;
use crate::domain::{round_to, Opportunity, Percent};

/// An opportunity the session decided to keep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bookmark {
    pub saved_at: DateTime<Utc>,
    pub record: OpportunityRecord,
}

/// Summary of one scan within the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitPoint {
    pub at: DateTime<Utc>,
    pub opportunities: usize,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub best_profit_percent: Option<Percent>,
}

/// End-of-session totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub scans: usize,
    pub total_opportunities: usize,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub best_profit_percent: Option<Percent>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_best_profit_percent: Option<Percent>,
    pub bookmarks: Vec<Bookmark>,
}

/// Bookmarks and profit history for one watch session.
#[derive(Debug, Clone)]
pub struct Session {
    started_at: DateTime<Utc>,
    bookmark_above: Option<Percent>,
    bookmarks: Vec<Bookmark>,
    seen: HashSet<String>,
    history: Vec<ProfitPoint>,
}

impl Session {
    /// Start a session; opportunities at or above `bookmark_above` are
    /// bookmarked automatically.
    pub fn new(bookmark_above: Option<Percent>) -> Self {
        Self {
            started_at: Utc::now(),
            bookmark_above,
            bookmarks: Vec::new(),
            seen: HashSet::new(),
            history: Vec::new(),
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn history(&self) -> &[ProfitPoint] {
        &self.history
    }

    /// Record a scan at `at`; returns how many new bookmarks it added.
    pub fn record(&mut self, report: &SportsReport, at: DateTime<Utc>) -> usize {
        let best = report.opportunities().map(Opportunity::profit_percent).max();
        self.history.push(ProfitPoint {
            at,
            opportunities: report.opportunity_count(),
            best_profit_percent: best,
        });

        let Some(threshold) = self.bookmark_above else {
            return 0;
        };
        let mut added = 0;
        for opportunity in report.opportunities() {
            if opportunity.profit_percent() >= threshold && self.bookmark(opportunity, report.synthetic, at) {
                added += 1;
            }
        }
        added
    }

    /// Bookmark one opportunity; false if an identical one is already kept.
    pub fn bookmark(&mut self, opportunity: &Opportunity, synthetic: bool, at: DateTime<Utc>) -> bool {
        if !self.seen.insert(bookmark_key(opportunity)) {
            return false;
        }
        self.bookmarks.push(Bookmark {
            saved_at: at,
            record: OpportunityRecord::new(opportunity, synthetic),
        });
        true
    }

    /// Best profit seen across the session.
    pub fn best_profit_percent(&self) -> Option<Percent> {
        self.history.iter().filter_map(|p| p.best_profit_percent).max()
    }

    /// Total opportunities seen across all scans.
    pub fn total_opportunities(&self) -> usize {
        self.history.iter().map(|p| p.opportunities).sum()
    }

    /// Average of the per-scan best profit, over scans that found any.
    pub fn average_best_profit_percent(&self) -> Option<Percent> {
        let values: Vec<Decimal> = self
            .history
            .iter()
            .filter_map(|p| p.best_profit_percent)
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<Decimal>() / Decimal::from(values.len()))
    }

    /// Totals for reporting; profits rounded to two places.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            started_at: self.started_at,
            scans: self.history.len(),
            total_opportunities: self.total_opportunities(),
            best_profit_percent: self.best_profit_percent().map(|p| round_to(p, 2)),
            average_best_profit_percent: self.average_best_profit_percent().map(|p| round_to(p, 2)),
            bookmarks: self.bookmarks.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.bookmarks.clear();
        self.seen.clear();
        self.history.clear();
    }
}

/// Event plus every leg's outcome, source and price.
fn bookmark_key(opportunity: &Opportunity) -> String {
    let legs: Vec<String> = opportunity
        .legs()
        .iter()
        .map(|leg| format!("{}@{}:{}", leg.outcome_label, leg.source_id, leg.price))
        .collect();
    format!("{}|{}", opportunity.event_label(), legs.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::sports::{EventScan, SportScan};
    use crate::app::status::SourceStatus;
    use crate::domain::{ArbitrageCalculator, Leg, SourceId};
    use rust_decimal_macros::dec;

    fn opportunity(event: &str, a: Decimal, b: Decimal) -> Opportunity {
        let legs = [("Home", a, "Alpha"), ("Away", b, "Beta")]
            .into_iter()
            .map(|(label, price, source)| Leg {
                outcome_label: label.into(),
                price,
                source_id: SourceId::from(source),
                source_url: None,
            })
            .collect();
        ArbitrageCalculator::new(dec!(100), dec!(0))
            .calculate(event, None, legs)
            .unwrap()
    }

    fn report(opportunities: Vec<Opportunity>) -> SportsReport {
        SportsReport {
            source: "test".into(),
            synthetic: false,
            sports: vec![SportScan {
                sport: "soccer_epl".into(),
                status: SourceStatus::Ok,
                events: vec![EventScan {
                    event_label: "any".into(),
                    quotes: 4,
                    skipped_providers: 0,
                    combinations_tested: 11,
                    over_limit: false,
                    opportunities,
                }],
            }],
        }
    }

    #[test]
    fn history_tracks_best_profit_per_scan() {
        let mut session = Session::new(None);
        session.record(&report(vec![opportunity("A vs B", dec!(2.2), dec!(2.2))]), Utc::now());
        session.record(&report(vec![]), Utc::now());

        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].best_profit_percent, None);
        assert_eq!(session.total_opportunities(), 1);
        assert!(session.best_profit_percent().unwrap() > dec!(9));
        assert!(session.bookmarks().is_empty());
    }

    #[test]
    fn summary_averages_scans_with_finds() {
        let mut session = Session::new(None);
        // 1/2.2 + 1/2.2 = 0.90909.. -> 9.09 %
        session.record(&report(vec![opportunity("A vs B", dec!(2.2), dec!(2.2))]), Utc::now());
        // 2/2.05 = 0.97560.. -> 2.44 %
        session.record(&report(vec![opportunity("C vs D", dec!(2.05), dec!(2.05))]), Utc::now());
        session.record(&report(vec![]), Utc::now());

        let summary = session.summary();
        assert_eq!(summary.scans, 3);
        assert_eq!(summary.total_opportunities, 2);
        assert_eq!(summary.best_profit_percent, Some(dec!(9.09)));
        assert_eq!(summary.average_best_profit_percent, Some(dec!(5.76)));
    }

    #[test]
    fn bookmarks_above_threshold_once() {
        let mut session = Session::new(Some(dec!(5)));
        let scan = report(vec![
            opportunity("A vs B", dec!(2.2), dec!(2.2)),
            opportunity("C vs D", dec!(2.05), dec!(2.05)),
        ]);

        assert_eq!(session.record(&scan, Utc::now()), 1);
        assert_eq!(session.record(&scan, Utc::now()), 0);
        assert_eq!(session.bookmarks().len(), 1);
        assert_eq!(session.bookmarks()[0].record.event, "A vs B");
    }

    #[test]
    fn clear_forgets_everything() {
        let mut session = Session::new(Some(dec!(0)));
        session.record(&report(vec![opportunity("A vs B", dec!(2.2), dec!(2.2))]), Utc::now());
        session.clear();

        assert!(session.bookmarks().is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.average_best_profit_percent(), None);
    }
}
