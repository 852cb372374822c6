use std::io::Write;

use arbscan::config::Config;
use arbscan::domain::forex::SplitMode;
use arbscan::domain::GeneratorMode;
use arbscan::error::{ConfigError, Error};
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn full_config_loads() {
    let file = write_temp_config(
        r#"
[logging]
level = "debug"
format = "json"

[detection]
mode = "best_price"
slot_count = 3
capital = 250
min_profit_percent = 0.5
max_enumerated_quotes = 40

[odds_api]
regions = "uk"
sports = ["soccer_epl"]

[forex]
exchanges = ["Left", "Right"]
currencies = ["USD", "CHF"]
spread_min_percent = 0.1
spread_max_percent = 0.4
split = "random"
seed = 9
request_delay_ms = 0

[watch]
interval_secs = 15
bookmark_above_percent = 2.5
"#,
    );

    let config = Config::load(file.path()).expect("valid config");

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.detection.mode, GeneratorMode::BestPrice);
    assert_eq!(config.detection.slot_count, 3);
    assert_eq!(config.detection.capital, dec!(250));
    assert_eq!(config.detection.max_enumerated_quotes, Some(40));
    assert_eq!(config.odds_api.sports, vec!["soccer_epl"]);
    assert_eq!(config.odds_api.market_key, "h2h");
    assert_eq!(config.forex.split, SplitMode::Random);
    assert_eq!(config.forex.seed, Some(9));
    assert_eq!(config.forex.spread_max_percent, dec!(0.4));
    assert_eq!(config.watch.interval_secs, 15);
    assert_eq!(config.watch.bookmark_above_percent, Some(dec!(2.5)));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = Config::load_or_default(dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config.detection.capital, dec!(1000));
    assert_eq!(config.detection.min_profit_percent, dec!(1.0));
    assert_eq!(config.forex.min_profit_percent, dec!(0.1));
}

#[test]
fn missing_file_is_an_error_for_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn config_rejects_non_positive_capital() {
    let file = write_temp_config("[detection]\ncapital = 0\n");
    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "detection.capital",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid capital error, got {err}"),
        Ok(_) => panic!("Expected invalid capital error, got Ok"),
    }
}

#[test]
fn config_rejects_inverted_spread_range() {
    let file = write_temp_config("[forex]\nspread_min_percent = 0.5\nspread_max_percent = 0.2\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("forex.spread_min_percent"), "{err}");
}

#[test]
fn config_rejects_empty_base_url() {
    let file = write_temp_config("[odds_api]\nbase_url = \"  \"\n");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::MissingField {
            field: "odds_api.base_url"
        }))
    ));
}

#[test]
fn syntax_errors_are_parse_errors() {
    let file = write_temp_config("[detection\ncapital = 5\n");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn unknown_generator_mode_is_rejected() {
    let file = write_temp_config("[detection]\nmode = \"guesswork\"\n");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}
