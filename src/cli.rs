//! CLI definitions for probewatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use probewatch_config::Config;

/// probewatch CLI.
#[derive(Parser)]
#[command(name = "probewatch")]
#[command(about = "Periodic URL probe service")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the server in foreground (default)
    Run {
        /// Server host, overrides `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Server port, overrides `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Apply command line overrides on top of the loaded configuration.
    pub(crate) fn apply_overrides(&self, config: &mut Config) {
        if let Some(Commands::Run { host, port }) = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["probewatch"]);
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::parse_from([
            "probewatch",
            "--config",
            "/etc/probewatch.toml",
            "run",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
        ]);
        assert_eq!(cli.config, PathBuf::from("/etc/probewatch.toml"));

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_run_without_flags_keeps_config() {
        let cli = Cli::parse_from(["probewatch", "run"]);
        let mut config = Config::default();
        config.server.port = 7000;
        cli.apply_overrides(&mut config);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["probewatch", "run", "--port", "70000"]).is_err());
    }
}
