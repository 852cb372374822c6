//! Command-line interface definitions.
//!
//! Defines the CLI structure for arbscan using `clap`. Global flags control
//! output format and verbosity; each subcommand runs one kind of scan or
//! inspects configuration.

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::domain::{GeneratorMode, SlotMatching};

/// Sports odds and forex spread arbitrage scanner
#[derive(Parser, Debug)]
#[command(name = "arbscan")]
#[command(version, about)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether human output should be colored.
    pub fn use_color(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
        }
    }

    /// Log level implied by `-q` / `-v`, if any.
    pub fn log_level(&self) -> Option<&'static str> {
        match (self.quiet, self.verbose) {
            (true, _) => Some("warn"),
            (false, 0) => None,
            (false, 1) => Some("debug"),
            (false, _) => Some("trace"),
        }
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan sports odds for arbitrage
    Sports(SportsArgs),

    /// Scan simulated forex spreads
    Forex(ForexArgs),

    /// Re-run sports scans on an interval, bookmarking the best finds
    Watch(WatchArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `arbscan config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// Where sports events come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Sport key to scan (repeatable; defaults to the configured list)
    #[arg(long = "sport", value_name = "KEY")]
    pub sports: Vec<String>,

    /// Read events from a saved JSON file instead of the live API
    #[arg(long, value_name = "FILE", conflicts_with = "synthetic")]
    pub fixture: Option<PathBuf>,

    /// Use generated demo events (results are flagged synthetic)
    #[arg(long)]
    pub synthetic: bool,

    /// Seed for generated demo events
    #[arg(long, requires = "synthetic")]
    pub seed: Option<u64>,
}

/// Overrides for the `[detection]` section.
#[derive(Args, Debug, Clone, Default)]
pub struct DetectionArgs {
    /// Override minimum profit percent
    #[arg(long, value_name = "PCT")]
    pub min_profit: Option<Decimal>,

    /// Override capital the stakes are sized against
    #[arg(long, value_name = "AMOUNT")]
    pub capital: Option<Decimal>,

    /// Combination generator [full_enumeration, best_price]
    #[arg(long)]
    pub mode: Option<GeneratorMode>,

    /// Slot matching for best-price mode [positional, label]
    #[arg(long)]
    pub slot_matching: Option<SlotMatching>,
}

/// Arguments for the `sports` subcommand.
#[derive(Args, Debug)]
pub struct SportsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

/// Arguments for the `forex` subcommand.
#[derive(Args, Debug)]
pub struct ForexArgs {
    /// Currency code to pair (repeatable; defaults to the configured list)
    #[arg(long = "currency", value_name = "CODE", conflicts_with = "all")]
    pub currencies: Vec<String>,

    /// Pair every currency the rate source lists
    #[arg(long)]
    pub all: bool,

    /// Override maximum number of pairs
    #[arg(long)]
    pub max_pairs: Option<usize>,

    /// Override delay between rate requests
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Override minimum profit percent
    #[arg(long, value_name = "PCT")]
    pub min_profit: Option<Decimal>,
}

/// Arguments for the `watch` subcommand.
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub detection: DetectionArgs,

    /// Override seconds between scans
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Stop after this many scans
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub iterations: Option<u32>,

    /// Bookmark opportunities at or above this profit percent
    #[arg(long, value_name = "PCT")]
    pub bookmark_above: Option<Decimal>,
}
