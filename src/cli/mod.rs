//! CLI module graph and command dispatch.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod forex;
pub mod output;
pub mod sports;
pub mod watch;

pub use command::Cli;

use command::{Commands, ConfigCommand};

use crate::config::Config;
use crate::error::Result;

/// Run the parsed command line.
///
/// Output must already be configured. Scan commands fall back to defaults
/// when the config file is missing; logging starts once the config is known.
pub async fn run(cli: Cli) -> Result<()> {
    let level = cli.log_level();

    match &cli.command {
        Commands::Config(ConfigCommand::Show) => {
            Config::default().logging.init(level);
            config::execute_show(&cli.config)
        }
        Commands::Config(ConfigCommand::Validate) => {
            Config::default().logging.init(level);
            config::execute_validate(&cli.config, cli.use_color())
        }
        Commands::Sports(args) => {
            let config = load(&cli)?;
            sports::execute(args, config).await
        }
        Commands::Forex(args) => {
            let config = load(&cli)?;
            forex::execute(args, config).await
        }
        Commands::Watch(args) => {
            let config = load(&cli)?;
            watch::execute(args, config).await
        }
    }
}

#[allow(clippy::result_large_err)]
fn load(cli: &Cli) -> Result<Config> {
    let config = Config::load_or_default(&cli.config)?;
    config.logging.init(cli.log_level());
    Ok(config)
}
