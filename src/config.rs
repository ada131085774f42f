//! Client configuration loaded from `worldctl.toml`.
//!
//! Missing fields use defaults. `WORLDCTL_SERVER` and `WORLDCTL_PORT` take
//! precedence over the file; command-line flags take precedence over both.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::tracking::PollPolicy;

pub const CONFIG_FILE: &str = "worldctl.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldctlConfig {
    /// Host name of the headless server.
    #[serde(default = "default_server")]
    pub server: String,

    /// Port of the headless server's control API.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Delay between job status polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Backoff cap between polls; equal to the interval for a fixed cadence.
    #[serde(default)]
    pub max_poll_interval_ms: Option<u64>,

    /// How long to wait for a job before giving up, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_server() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for WorldctlConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            port: default_port(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_interval_ms: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WorldctlConfig {
    /// Load `worldctl.toml` from the current directory, then apply the environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(Path::new(CONFIG_FILE))?;

        if let Ok(server) = std::env::var("WORLDCTL_SERVER")
            && !server.is_empty()
        {
            config.server = server;
        }
        if let Ok(port) = std::env::var("WORLDCTL_PORT")
            && !port.is_empty()
        {
            config.port = port
                .parse()
                .with_context(|| format!("WORLDCTL_PORT is not a valid port: {port}"))?;
        }

        Ok(config)
    }

    /// Load the given file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn poll_policy(&self) -> PollPolicy {
        let interval = Duration::from_millis(self.poll_interval_ms.max(1));
        let max_interval = self
            .max_poll_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(interval);
        PollPolicy {
            interval,
            max_interval,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
