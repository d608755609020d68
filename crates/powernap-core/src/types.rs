//! Domain types for panel-managed servers.
//!
//! These types describe what the panel API talks about: servers addressed
//! by a remote identifier, the power signals sent to them, and the
//! lifecycle states they report back. All of them are ephemeral values
//! owned by the caller; nothing here persists across a restart.

use serde::{Deserialize, Serialize};

/// Unique identifier of a server on the panel (the path segment used by
/// the client API).
pub type ServerId = String;

// ── Server reference ──────────────────────────────────────────────

/// A managed server: the display name used in logs plus the panel-side
/// identifier used in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRef {
    /// Human-readable name, used only for logging.
    pub name: String,
    /// Panel identifier addressed by API requests.
    pub server_id: ServerId,
}

impl ServerRef {
    /// Create a reference from a name and panel identifier.
    pub fn new(name: impl Into<String>, server_id: impl Into<ServerId>) -> Self {
        Self {
            name: name.into(),
            server_id: server_id.into(),
        }
    }
}

// ── Power signal ──────────────────────────────────────────────────

/// A power directive sent to a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerSignal {
    Start,
    Stop,
}

impl PowerSignal {
    /// Wire-level token sent in the request body.
    pub fn wire(self) -> &'static str {
        match self {
            PowerSignal::Start => "start",
            PowerSignal::Stop => "stop",
        }
    }

    /// Human label for log lines.
    pub fn verb(self) -> &'static str {
        match self {
            PowerSignal::Start => "Starting",
            PowerSignal::Stop => "Stopping",
        }
    }
}

// ── Power state ───────────────────────────────────────────────────

/// Lifecycle state reported by the panel for a server.
///
/// The subsystem only ever branches on `Offline`; every other value is
/// "not yet offline". Known states keep their names so log lines can say
/// what the server is still doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerState {
    Offline,
    Starting,
    Running,
    Stopping,
    /// Any state string this client does not recognize.
    Unknown,
}

impl PowerState {
    /// Map a panel-reported state string to a `PowerState`.
    ///
    /// Total: unrecognized strings become `Unknown` rather than an error,
    /// since anything other than `offline` is treated the same way.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "offline" => PowerState::Offline,
            "starting" => PowerState::Starting,
            "running" => PowerState::Running,
            "stopping" => PowerState::Stopping,
            _ => PowerState::Unknown,
        }
    }

    /// The wire-level name of this state.
    pub fn as_str(self) -> &'static str {
        match self {
            PowerState::Offline => "offline",
            PowerState::Starting => "starting",
            PowerState::Running => "running",
            PowerState::Stopping => "stopping",
            PowerState::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PowerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
