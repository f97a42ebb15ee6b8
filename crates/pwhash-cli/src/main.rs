use std::process::exit;

use clap::Parser;
use cli::Cli;
use command::Outcome;
use config::Config;
use garde::Validate;
use pwhash_telemetry::Telemetry;
use tracing::{debug, error};

mod cli;
mod command;
mod config;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let cfg = {
        let _g = Telemetry::stderr();

        let cfg = Config::load(cli.config.clone()).await.unwrap_or_else(|e| {
            error!("failed to load config: {e}");
            exit(1)
        });

        cfg.validate().unwrap_or_else(|e| {
            error!("invalid config: {e}");
            exit(1)
        });

        cfg
    };

    let _telemetry = Telemetry::new(&cfg.telemetry).init().inspect_err(|e| {
        error!("failed to initialize telemetry: {e}");
    })?;

    debug!(config = %cfg, "loaded config");

    match command::run(cli.command, &cfg, &mut std::io::stdout().lock()).await? {
        Outcome::Done | Outcome::Match => Ok(()),
        Outcome::Mismatch => exit(2),
    }
}
