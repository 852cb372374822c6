//! Handler for the `sports` command.

use serde_json::json;

use super::command::{DetectionArgs, SourceArgs, SportsArgs};
use super::output;
use crate::adapter::{FixtureOddsSource, OddsApiClient, SyntheticOddsSource, ALL_SPORTS};
use crate::app::{OpportunityRecord, OpportunityRow, SportsReport, SportsScanner};
use crate::config::Config;
use crate::error::Result;
use crate::port::OddsSource;

/// Events generated per sport by `--synthetic`.
const SYNTHETIC_EVENTS_PER_SPORT: usize = 6;

/// Execute `sports`.
pub async fn execute(args: &SportsArgs, mut config: Config) -> Result<()> {
    apply_detection(&mut config, &args.detection)?;
    let source = build_source(&args.source, &config);
    let sports = sports_for(&args.source, &config);
    let scanner = SportsScanner::from_config(&config);

    if !output::is_json() {
        output::section("Sports arbitrage scan");
        output::field("Source", source.name());
        output::field("Generator", scanner.generator_name());
        output::field("Min profit", format!("{}%", config.detection.min_profit_percent));
        output::field("Capital", config.detection.capital);
    }

    let pb = output::spinner(&format!("Scanning {} sport(s)...", sports.len()));
    let report = scanner.scan(source.as_ref(), &sports).await;
    output::spinner_success(
        &pb,
        &format!(
            "Scanned {} event(s) across {} sport(s)",
            report.event_count(),
            report.sports.len()
        ),
    );

    render_report(&report);
    Ok(())
}

/// Apply command-line detection overrides and re-validate.
#[allow(clippy::result_large_err)]
pub(crate) fn apply_detection(config: &mut Config, args: &DetectionArgs) -> Result<()> {
    let detection = &mut config.detection;
    if let Some(min_profit) = args.min_profit {
        detection.min_profit_percent = min_profit;
    }
    if let Some(capital) = args.capital {
        detection.capital = capital;
    }
    if let Some(mode) = args.mode {
        detection.mode = mode;
    }
    if let Some(matching) = args.slot_matching {
        detection.slot_matching = matching;
    }
    config.validate()
}

/// Pick the odds source the flags ask for.
pub(crate) fn build_source(args: &SourceArgs, config: &Config) -> Box<dyn OddsSource> {
    if let Some(path) = &args.fixture {
        return Box::new(FixtureOddsSource::new(path));
    }
    if args.synthetic {
        return Box::new(SyntheticOddsSource::new(SYNTHETIC_EVENTS_PER_SPORT, args.seed));
    }

    let client = OddsApiClient::from_config(&config.odds_api);
    if !client.has_api_key() {
        output::warning("No Odds API key configured; every sport will report unavailable");
        output::hint("set ODDS_API_KEY, or try --fixture <file> or --synthetic");
    }
    Box::new(client)
}

/// Sports to scan: flags first, then every event for fixtures, then config.
pub(crate) fn sports_for(args: &SourceArgs, config: &Config) -> Vec<String> {
    if !args.sports.is_empty() {
        return args.sports.clone();
    }
    if args.fixture.is_some() {
        return vec![ALL_SPORTS.to_string()];
    }
    config.odds_api.sports.clone()
}

/// Print a sports report as JSON lines or a table.
pub(crate) fn render_report(report: &SportsReport) {
    let records: Vec<OpportunityRecord> = report
        .opportunities()
        .map(|opportunity| OpportunityRecord::new(opportunity, report.synthetic))
        .collect();

    for scan in report.unavailable() {
        let reason = scan.status.reason().unwrap_or_default();
        if output::is_json() {
            output::record(
                "source_status",
                &json!({ "sport": scan.sport, "source": report.source, "status": scan.status }),
            );
        } else {
            output::warning(&format!("{} unavailable: {reason}", scan.sport));
        }
    }

    if output::is_json() {
        for record in &records {
            output::record("opportunity", record);
        }
        output::record(
            "summary",
            &json!({
                "source": report.source,
                "synthetic": report.synthetic,
                "sports": report.sports.len(),
                "unavailable": report.unavailable().count(),
                "events": report.event_count(),
                "skipped_providers": report.skipped_providers(),
                "opportunities": records.len(),
            }),
        );
        return;
    }

    if report.synthetic {
        output::warning("Synthetic demo data: these opportunities are not real");
    }
    if records.is_empty() {
        if report.unavailable().count() < report.sports.len() {
            output::note("No arbitrage opportunities found");
        }
        return;
    }

    output::section(&format!(
        "{} opportunit{}",
        output::positive(records.len()),
        if records.len() == 1 { "y" } else { "ies" }
    ));
    let rows: Vec<OpportunityRow> = records.iter().map(OpportunityRow::from).collect();
    output::table(&rows);
    if report.skipped_providers() > 0 {
        output::note(&format!(
            "{} provider entr{} skipped as malformed",
            report.skipped_providers(),
            if report.skipped_providers() == 1 { "y" } else { "ies" }
        ));
    }
}
