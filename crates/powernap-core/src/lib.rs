//! powernap-core — domain types and configuration for powernap.
//!
//! Defines the vocabulary shared by the panel client and the CLI:
//! server references, power signals and states, poll policies, and the
//! TOML-backed configuration surface. No I/O beyond reading the config
//! file; all network behavior lives in `powernap-panel`.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, PanelConfig, PollPolicy, RestoreConfig, StopFailurePolicy};
pub use error::ConfigError;
pub use types::{PowerSignal, PowerState, ServerId, ServerRef};
