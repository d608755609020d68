//! Configuration surface consumed by the panel client.
//!
//! Loaded from a TOML file or assembled directly by the caller. Poll
//! cadence is validated at construction: a `PollPolicy` can only exist
//! with a positive interval and timeout.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Panel API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Base URL of the panel (e.g. `https://panel.example.com`).
    pub base_url: String,
    /// Client API bearer token.
    pub api_key: String,
}

/// Poll cadence and deadline for a wait-for-state loop.
///
/// Invariant: both durations are positive. Results arriving after the
/// deadline are discarded by the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    timeout: Duration,
}

impl PollPolicy {
    /// Build a policy from whole seconds, rejecting zero values.
    pub fn from_secs(interval_secs: u64, timeout_secs: u64) -> Result<Self, ConfigError> {
        if interval_secs == 0 {
            return Err(ConfigError::NotPositive {
                field: "ping_interval_secs",
            });
        }
        if timeout_secs == 0 {
            return Err(ConfigError::NotPositive {
                field: "timeout_secs",
            });
        }
        Ok(Self {
            interval: Duration::from_secs(interval_secs),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Delay between successive status queries.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total deadline for the poll loop.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// What to do when the initial stop signal of a restore sequence is
/// rejected by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopFailurePolicy {
    /// Log the failure and keep waiting for the server to go offline.
    /// The server may already be stopping or stopped for another reason.
    #[default]
    Detach,
    /// Fail the restore immediately if the stop signal is rejected.
    Abort,
}

/// Settings for the stop-confirm-restore sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreConfig {
    /// Seconds between status queries while waiting for shutdown.
    pub ping_interval_secs: u64,
    /// Seconds to wait for the server to report offline before giving up.
    pub timeout_secs: u64,
    /// Policy applied when the stop signal itself is rejected.
    pub on_stop_failure: StopFailurePolicy,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            ping_interval_secs: 3,
            timeout_secs: 60,
            on_stop_failure: StopFailurePolicy::default(),
        }
    }
}

impl RestoreConfig {
    /// Validated poll policy for the wait-for-offline step.
    pub fn poll_policy(&self) -> Result<PollPolicy, ConfigError> {
        PollPolicy::from_secs(self.ping_interval_secs, self.timeout_secs)
    }
}

/// Top-level configuration file shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub panel: PanelConfig,
    #[serde(default)]
    pub restore: RestoreConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        Ok(config)
    }
}
