//! Handler for the `watch` command.

use std::time::Duration;

use chrono::Utc;
use tokio::signal;
use tokio::time::sleep;
use tracing::info;

use super::command::WatchArgs;
use super::output;
use super::sports::{apply_detection, build_source, render_report, sports_for};
use crate::app::{OpportunityRow, Session, SportsScanner};
use crate::config::Config;
use crate::error::Result;

/// Execute `watch`: scan, sleep, repeat until the iteration budget runs out
/// or Ctrl-C arrives.
pub async fn execute(args: &WatchArgs, mut config: Config) -> Result<()> {
    if let Some(interval) = args.interval {
        config.watch.interval_secs = interval;
    }
    if args.bookmark_above.is_some() {
        config.watch.bookmark_above_percent = args.bookmark_above;
    }
    apply_detection(&mut config, &args.detection)?;

    let source = build_source(&args.source, &config);
    let sports = sports_for(&args.source, &config);
    let scanner = SportsScanner::from_config(&config);
    let interval = Duration::from_secs(config.watch.interval_secs);
    let mut session = Session::new(config.watch.bookmark_above_percent);

    if !output::is_json() {
        output::section("Watching for arbitrage");
        output::field("Source", source.name());
        output::field("Interval", format!("{}s", config.watch.interval_secs));
        if let Some(max) = args.iterations {
            output::field("Scans", max);
        }
        if let Some(threshold) = config.watch.bookmark_above_percent {
            output::field("Bookmark above", format!("{threshold}%"));
        }
    }

    let mut scans: u32 = 0;
    loop {
        scans += 1;
        if !output::is_json() {
            output::section(&format!("Scan {scans}"));
        }
        let report = scanner.scan(source.as_ref(), &sports).await;
        let added = session.record(&report, Utc::now());
        render_report(&report);
        if added > 0 {
            output::success(&format!("Bookmarked {added} opportunit{}", plural_y(added)));
        }

        if args.iterations.is_some_and(|max| scans >= max) {
            break;
        }
        tokio::select! {
            () = sleep(interval) => {}
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    render_summary(&session);
    session.clear();
    Ok(())
}

fn render_summary(session: &Session) {
    let summary = session.summary();
    if output::is_json() {
        output::record("session", &summary);
        return;
    }

    output::section("Session summary");
    output::field("Started", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    output::field("Scans", summary.scans);
    output::field("Opportunities", summary.total_opportunities);
    output::field(
        "Best profit",
        summary
            .best_profit_percent
            .map_or_else(|| output::muted("-"), |p| output::positive(format!("{p}%"))),
    );
    output::field(
        "Average best",
        summary
            .average_best_profit_percent
            .map_or_else(|| output::muted("-"), |p| format!("{p}%")),
    );

    if summary.bookmarks.is_empty() {
        return;
    }
    output::section("Bookmarks");
    let rows: Vec<OpportunityRow> = summary
        .bookmarks
        .iter()
        .map(|bookmark| OpportunityRow::from(&bookmark.record))
        .collect();
    output::table(&rows);
}

const fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}
