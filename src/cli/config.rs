//! Handler for the `config` command group.

use std::path::Path;

use super::diagnostic::{self, ConfigDiagnostic};
use super::output;
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Execute `config show`: the effective configuration, secrets masked.
#[allow(clippy::result_large_err)]
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?.redacted();

    if output::is_json() {
        output::record("config", &config);
        return Ok(());
    }

    output::section("Effective configuration");
    if path.exists() {
        output::field("Path", path.display());
    } else {
        output::field("Path", output::muted(format!("{} (not found, defaults)", path.display())));
    }
    println!();
    output::lines(&config.to_toml()?);
    Ok(())
}

/// Execute `config validate`. Unlike the scan commands, the file must exist.
#[allow(clippy::result_large_err)]
pub fn execute_validate(path: &Path, color: bool) -> Result<()> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

    match Config::parse_toml(&content) {
        Ok(_) => {
            if output::is_json() {
                output::record(
                    "config_validation",
                    &serde_json::json!({ "path": path.display().to_string(), "valid": true }),
                );
            } else {
                output::success("Configuration is valid");
                output::field("Path", path.display());
            }
            Ok(())
        }
        Err(Error::Config(ConfigError::Parse(err))) => {
            if !output::is_json() {
                let diagnostic = ConfigDiagnostic::from_toml(&err, &content);
                eprintln!("{}", diagnostic::render(&diagnostic, color));
            }
            Err(ConfigError::Parse(err).into())
        }
        Err(err) => {
            if !output::is_json() {
                output::hint("run `arbscan config show` to see the defaults");
            }
            Err(err)
        }
    }
}
