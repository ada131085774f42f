//! Command-line interface definitions.
//!
//! Global flags override `worldctl.toml`; each [`Command`] maps onto one
//! verb in [`crate::verbs`].

use clap::{Args, Parser, Subcommand};
use reqwest::Url;

use crate::config::WorldctlConfig;

/// worldctl — control a headless world server from the shell.
#[derive(Debug, Parser)]
#[command(name = "worldctl", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Host name of the headless server.
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Port of the headless server's control API.
    #[arg(long, short, global = true)]
    pub port: Option<u16>,

    /// Give up waiting for a job after this many seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Delay between job status polls, in milliseconds.
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Where the world to start comes from. Exactly one must be given.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct WorldSource {
    /// Name of the builtin template to start.
    #[arg(short, long)]
    pub template: Option<String>,

    /// Record URL of the world to start.
    #[arg(short, long)]
    pub url: Option<Url>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Starts a world and waits until it is running.
    StartWorld {
        #[command(flatten)]
        source: WorldSource,
    },

    /// Shows the current status of a job.
    ShowJob {
        /// Identifier of the job.
        id: String,
    },

    /// Waits for a previously started job to finish.
    WaitJob {
        /// Identifier of the job.
        id: String,
    },
}

impl Cli {
    /// Layer the command-line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut WorldctlConfig) {
        if let Some(server) = &self.server {
            config.server = server.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_secs = timeout;
        }
        if let Some(interval) = self.poll_interval_ms {
            config.poll_interval_ms = interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_parses_start_world_template() {
        let cli = Cli::parse_from(["worldctl", "start-world", "--template", "Grid"]);
        match cli.command {
            Command::StartWorld { source } => {
                assert_eq!(source.template.as_deref(), Some("Grid"));
                assert!(source.url.is_none());
            }
            _ => panic!("expected StartWorld command"),
        }
    }

    #[test]
    fn cli_parses_start_world_url() {
        let cli = Cli::parse_from([
            "worldctl",
            "start-world",
            "-u",
            "https://records.example.com/U-someone/R-world",
        ]);
        match cli.command {
            Command::StartWorld { source } => {
                assert!(source.template.is_none());
                assert_eq!(
                    source.url.unwrap().as_str(),
                    "https://records.example.com/U-someone/R-world"
                );
            }
            _ => panic!("expected StartWorld command"),
        }
    }

    #[test]
    fn cli_rejects_both_sources() {
        let err = Cli::try_parse_from([
            "worldctl",
            "start-world",
            "-t",
            "Grid",
            "-u",
            "https://records.example.com/U-someone/R-world",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn cli_requires_a_source() {
        let err = Cli::try_parse_from(["worldctl", "start-world"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn cli_rejects_invalid_url() {
        let err = Cli::try_parse_from(["worldctl", "start-world", "--url", "not a url"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "worldctl",
            "--server",
            "headless.lan",
            "--port",
            "6000",
            "--timeout-secs",
            "42",
            "--verbose",
            "wait-job",
            "job-1",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.server.as_deref(), Some("headless.lan"));
        assert_eq!(cli.port, Some(6000));
        assert_eq!(cli.timeout_secs, Some(42));
        assert!(matches!(cli.command, Command::WaitJob { ref id } if id == "job-1"));
    }

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from([
            "worldctl",
            "show-job",
            "job-1",
            "--port",
            "6000",
            "--poll-interval-ms",
            "250",
        ]);
        let mut config = WorldctlConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.port, 6000);
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.server, "localhost");
        assert_eq!(config.timeout_secs, 300);
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
