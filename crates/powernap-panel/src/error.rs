//! Panel client error types.
//!
//! One enum per operation family, each variant naming the stage that
//! failed. Nothing here retries: a single failed attempt is final for
//! that call, and the caller decides what happens next.

use std::time::Duration;

use powernap_core::PowerState;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors from sending a power signal.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Errors from a single status query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("malformed status response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Errors from a wait-for-state poll loop.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("timed out after {timeout:?} waiting for state {target}")]
    Timeout {
        target: PowerState,
        timeout: Duration,
    },

    #[error("status query failed: {0}")]
    Query(#[from] QueryError),
}

/// Errors from the stop-confirm-restore sequence.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("stop signal rejected: {0}")]
    StopRejected(#[source] SignalError),

    #[error("server never confirmed offline: {0}")]
    StopConfirmation(#[source] PollError),

    #[error("restore request failed with status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("another operation is already in flight for this server")]
    OperationInFlight,
}

/// Errors from memory-limit aggregation.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("malformed server list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
