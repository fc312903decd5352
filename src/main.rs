//! probewatch - periodic URL probe service.
//!
//! Usage:
//!   probewatch                              - Run with config/default.toml
//!   probewatch --config my.toml             - Run with another config file
//!   probewatch run --host 0.0.0.0 --port 9000

mod cli;
mod server;

use clap::Parser;
use tracing::warn;

use probewatch_config::{ConfigLoader, ConfigValidator};

use crate::cli::Cli;
use crate::server::{init_tracing, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    cli.apply_overrides(&mut config);
    let warnings = ConfigValidator::validate(&config).into_result()?;

    init_tracing(&config.logging)?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    run_server(config).await
}
