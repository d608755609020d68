//! powernap-panel — panel API client for on-demand server power control.
//!
//! Sends power signals to panel-managed servers, polls their reported
//! state until a target or deadline, sequences the
//! stop → confirm-offline → restore-from-backup operation, and aggregates
//! declared memory limits across servers.
//!
//! # Architecture
//!
//! ```text
//! PanelClient (reqwest, bearer auth)
//!   ├── send_power_signal()    single attempt, 204 = accepted
//!   ├── power_state()          GET resources → attributes.current_state
//!   ├── wait_for_state()       sequential poll loop under a deadline
//!   └── total_memory_limit()   server list, client-side filter, sum
//! Restorer
//!   ├── OperationLeases        one operation per server at a time
//!   ├── stop signal            detached, or abort-on-rejection
//!   ├── wait_for_state(Offline)
//!   └── request_backup_restore()  204 = accepted; remote completion
//!                                 is not awaited
//! ```
//!
//! # Failure model
//!
//! Every operation is a single attempt: a failed request is final for
//! that call and surfaces as a typed error. Retry and backoff, if
//! desired, belong to the caller. The poll loop's deadline is the only
//! cancellation mechanism; a query still in flight when the deadline
//! fires is dropped, never delivered.

pub mod client;
pub mod error;
pub mod lease;
pub mod poller;
pub mod resources;
pub mod restore;

pub use client::PanelClient;
pub use error::{AggregationError, PollError, QueryError, RestoreError, SignalError};
pub use lease::{LeaseGuard, OperationLeases};
pub use restore::Restorer;
