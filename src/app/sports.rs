//! Sports scan: collector → generator → calculator, per event and sport.

use tracing::{debug, info, warn};

use super::status::SourceStatus;
use crate::config::Config;
use crate::domain::{
    ArbitrageCalculator, CombinationGenerator, GeneratorMode, Opportunity, OutcomeCollector,
    RawEvent,
};
use crate::port::OddsSource;

/// What scanning one event produced.
#[derive(Debug, Clone)]
pub struct EventScan {
    pub event_label: String,
    pub quotes: usize,
    pub skipped_providers: usize,
    pub combinations_tested: usize,
    /// True when the event exceeded the enumeration bound and was not tested.
    pub over_limit: bool,
    pub opportunities: Vec<Opportunity>,
}

/// Result for one sport from one source.
#[derive(Debug, Clone)]
pub struct SportScan {
    pub sport: String,
    pub status: SourceStatus,
    pub events: Vec<EventScan>,
}

impl SportScan {
    pub fn opportunities(&self) -> impl Iterator<Item = &Opportunity> {
        self.events.iter().flat_map(|event| event.opportunities.iter())
    }
}

/// Result of one scan across sports.
#[derive(Debug, Clone)]
pub struct SportsReport {
    pub source: String,
    pub synthetic: bool,
    pub sports: Vec<SportScan>,
}

impl SportsReport {
    pub fn opportunities(&self) -> impl Iterator<Item = &Opportunity> {
        self.sports.iter().flat_map(SportScan::opportunities)
    }

    pub fn opportunity_count(&self) -> usize {
        self.opportunities().count()
    }

    pub fn event_count(&self) -> usize {
        self.sports.iter().map(|s| s.events.len()).sum()
    }

    pub fn skipped_providers(&self) -> usize {
        self.sports
            .iter()
            .flat_map(|s| s.events.iter())
            .map(|e| e.skipped_providers)
            .sum()
    }

    /// Sports whose source could not be read.
    pub fn unavailable(&self) -> impl Iterator<Item = &SportScan> {
        self.sports.iter().filter(|s| !s.status.is_ok())
    }
}

/// Runs the detection pipeline over raw events.
pub struct SportsScanner {
    collector: OutcomeCollector,
    generator: Box<dyn CombinationGenerator>,
    calculator: ArbitrageCalculator,
    max_enumerated_quotes: Option<usize>,
}

impl SportsScanner {
    pub fn new(
        collector: OutcomeCollector,
        generator: Box<dyn CombinationGenerator>,
        calculator: ArbitrageCalculator,
    ) -> Self {
        Self {
            collector,
            generator,
            calculator,
            max_enumerated_quotes: None,
        }
    }

    /// Skip events with more quotes than `limit`.
    #[must_use]
    pub fn with_quote_limit(mut self, limit: Option<usize>) -> Self {
        self.max_enumerated_quotes = limit;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        let detection = &config.detection;
        let limit = match detection.mode {
            GeneratorMode::FullEnumeration => detection.max_enumerated_quotes,
            GeneratorMode::BestPrice => None,
        };
        Self::new(
            detection.collector(&config.odds_api.market_key),
            detection.generator(),
            detection.calculator(),
        )
        .with_quote_limit(limit)
    }

    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Scan one raw event.
    pub fn scan_event(&self, event: &RawEvent) -> EventScan {
        let collection = self.collector.collect(event);
        let set = &collection.quote_set;

        let mut scan = EventScan {
            event_label: set.event_label().to_string(),
            quotes: set.len(),
            skipped_providers: collection.skipped_count(),
            combinations_tested: 0,
            over_limit: false,
            opportunities: Vec::new(),
        };

        if let Some(limit) = self.max_enumerated_quotes {
            if set.len() > limit {
                warn!(
                    event = %scan.event_label,
                    quotes = set.len(),
                    limit,
                    "Too many quotes to enumerate, skipping event"
                );
                scan.over_limit = true;
                return scan;
            }
        }

        for legs in self.generator.combinations(set) {
            scan.combinations_tested += 1;
            if let Some(opportunity) =
                self.calculator
                    .calculate(set.event_label(), set.timestamp(), legs)
            {
                scan.opportunities.push(opportunity);
            }
        }

        debug!(
            event = %scan.event_label,
            quotes = scan.quotes,
            tested = scan.combinations_tested,
            found = scan.opportunities.len(),
            "Scanned event"
        );
        scan
    }

    /// Fetch and scan one sport.
    pub async fn scan_sport(&self, source: &dyn OddsSource, sport: &str) -> SportScan {
        match source.fetch_events(sport).await {
            Ok(events) => SportScan {
                sport: sport.to_string(),
                status: SourceStatus::Ok,
                events: events.iter().map(|event| self.scan_event(event)).collect(),
            },
            Err(err) => {
                warn!(source = source.name(), sport, error = %err, "Source unavailable");
                SportScan {
                    sport: sport.to_string(),
                    status: SourceStatus::unavailable(err),
                    events: Vec::new(),
                }
            }
        }
    }

    /// Fetch and scan every sport in order.
    pub async fn scan(&self, source: &dyn OddsSource, sports: &[String]) -> SportsReport {
        let mut scans = Vec::with_capacity(sports.len());
        for sport in sports {
            scans.push(self.scan_sport(source, sport).await);
        }

        let report = SportsReport {
            source: source.name().to_string(),
            synthetic: source.is_synthetic(),
            sports: scans,
        };
        info!(
            source = %report.source,
            generator = self.generator.name(),
            events = report.event_count(),
            opportunities = report.opportunity_count(),
            skipped_providers = report.skipped_providers(),
            unavailable = report.unavailable().count(),
            "Sports scan complete"
        );
        report
    }
}
