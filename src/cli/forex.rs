//! Handler for the `forex` command.

use serde_json::json;

use super::command::ForexArgs;
use super::output;
use crate::adapter::ExchangeRateClient;
use crate::app::{discover_currencies, ForexReport, ForexScanner, SpreadRow};
use crate::config::Config;
use crate::error::Result;
use crate::port::RateSource;

/// Execute `forex`.
pub async fn execute(args: &ForexArgs, mut config: Config) -> Result<()> {
    apply_overrides(&mut config, args)?;
    let client = ExchangeRateClient::from_config(&config.forex);

    let currencies = if args.all {
        let pb = output::spinner("Fetching currency symbols...");
        let codes = discover_currencies(&client).await;
        output::spinner_success(&pb, &format!("{} currencies", codes.len()));
        codes
    } else if args.currencies.is_empty() {
        config.forex.currencies.clone()
    } else {
        normalize_codes(&args.currencies)
    };

    let mut scanner = ForexScanner::from_config(&config.forex);
    let pairs = scanner.pairs(&currencies);

    if !output::is_json() {
        output::section("Forex spread scan");
        output::field("Source", client.name());
        output::field("Currencies", currencies.len());
        output::field("Pairs", pairs.len());
        output::field("Min profit", format!("{}%", config.forex.min_profit_percent));
        output::note("Exchange quotes are simulated around live mid rates");
    }

    let pb = output::spinner(&format!("Requesting {} rate(s)...", pairs.len()));
    let report = scanner.scan(&client, &pairs).await;
    if report.status.is_ok() {
        output::spinner_success(&pb, &format!("Quoted {} pair(s)", report.pairs_quoted));
    } else {
        output::spinner_fail(&pb, "Rate source unavailable");
    }

    render_report(&report);
    Ok(())
}

#[allow(clippy::result_large_err)]
fn apply_overrides(config: &mut Config, args: &ForexArgs) -> Result<()> {
    let forex = &mut config.forex;
    if let Some(max_pairs) = args.max_pairs {
        forex.max_pairs = max_pairs;
    }
    if let Some(delay_ms) = args.delay_ms {
        forex.request_delay_ms = delay_ms;
    }
    if let Some(min_profit) = args.min_profit {
        forex.min_profit_percent = min_profit;
    }
    config.validate()
}

/// Uppercase, trimmed, first occurrence kept.
fn normalize_codes(codes: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.trim().to_ascii_uppercase();
        if !code.is_empty() && !out.contains(&code) {
            out.push(code);
        }
    }
    out
}

fn render_report(report: &ForexReport) {
    let rows: Vec<SpreadRow> = report.opportunities.iter().map(SpreadRow::from).collect();

    if output::is_json() {
        for row in &rows {
            output::record("spread", row);
        }
        output::record(
            "summary",
            &json!({
                "source": report.source,
                "status": report.status,
                "pairs_requested": report.pairs_requested,
                "pairs_quoted": report.pairs_quoted,
                "failed_requests": report.failed_requests,
                "opportunities": rows.len(),
            }),
        );
        return;
    }

    if let Some(reason) = report.status.reason() {
        output::warning(&format!("{} unavailable: {reason}", report.source));
        return;
    }
    if report.failed_requests > 0 {
        output::warning(&format!(
            "{} of {} rate requests failed",
            report.failed_requests, report.pairs_requested
        ));
    }
    if rows.is_empty() {
        output::note("No spread opportunities found");
        return;
    }

    output::section(&format!("{} spread(s)", output::positive(rows.len())));
    output::table(&rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn codes_are_normalized_and_deduplicated() {
        let codes = ["usd", " EUR ", "USD", ""].map(String::from);
        assert_eq!(normalize_codes(&codes), vec!["USD", "EUR"]);
    }

    #[test]
    fn overrides_are_validated() {
        let mut config = Config::default();
        let args = ForexArgs {
            currencies: Vec::new(),
            all: false,
            max_pairs: Some(10),
            delay_ms: Some(0),
            min_profit: Some(dec!(0.2)),
        };
        apply_overrides(&mut config, &args).unwrap();
        assert_eq!(config.forex.max_pairs, 10);
        assert_eq!(config.forex.request_delay_ms, 0);
        assert_eq!(config.forex.min_profit_percent, dec!(0.2));

        let args = ForexArgs {
            max_pairs: Some(0),
            ..args
        };
        assert!(apply_overrides(&mut config, &args).is_err());
    }
}
