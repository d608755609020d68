//! Restore sequencing — stop, confirm offline, restore from backup.
//!
//! The `Restorer` composes the signal sender and the wait-for-state loop
//! into a strictly ordered sequence. The restore request is only ever
//! issued after the server has confirmed offline; if confirmation fails
//! or times out, the restore endpoint is never touched.

use powernap_core::{
    ConfigError, PollPolicy, PowerSignal, PowerState, RestoreConfig, ServerRef, StopFailurePolicy,
};
use tracing::{info, warn};

use crate::client::PanelClient;
use crate::error::RestoreError;
use crate::lease::OperationLeases;

/// Drives the stop → confirm-offline → restore-from-backup sequence.
pub struct Restorer {
    client: PanelClient,
    policy: PollPolicy,
    on_stop_failure: StopFailurePolicy,
    leases: OperationLeases,
}

impl Restorer {
    /// Create a restorer with the default stop-failure policy (detach).
    pub fn new(client: PanelClient, policy: PollPolicy) -> Self {
        Self {
            client,
            policy,
            on_stop_failure: StopFailurePolicy::default(),
            leases: OperationLeases::new(),
        }
    }

    /// Create a restorer from restore configuration.
    pub fn from_config(client: PanelClient, config: &RestoreConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client,
            policy: config.poll_policy()?,
            on_stop_failure: config.on_stop_failure,
            leases: OperationLeases::new(),
        })
    }

    /// Override the stop-failure policy.
    pub fn with_stop_failure_policy(mut self, policy: StopFailurePolicy) -> Self {
        self.on_stop_failure = policy;
        self
    }

    /// Stop the server, wait until it reports offline, then ask the
    /// panel to restore the given backup.
    ///
    /// Resolves once the restore request has been accepted; the restore
    /// itself runs remotely. At most one sequence per server runs at a
    /// time: a second call while one is in flight fails with
    /// [`RestoreError::OperationInFlight`]. Note the panel enforces no
    /// such exclusion itself — this guard is local to this restorer.
    pub async fn restore_from_backup(
        &self,
        server: &ServerRef,
        backup_id: &str,
    ) -> Result<(), RestoreError> {
        let _lease = self
            .leases
            .acquire(&server.server_id)
            .ok_or(RestoreError::OperationInFlight)?;

        info!(server = %server.name, backup = %backup_id, "starting restore sequence");

        match self.on_stop_failure {
            StopFailurePolicy::Detach => {
                // Failure reporting is detached from sequencing: the wait
                // step below decides whether the server actually went down.
                let client = self.client.clone();
                let stop_target = server.clone();
                tokio::spawn(async move {
                    if let Err(err) = client
                        .send_power_signal(&stop_target, PowerSignal::Stop)
                        .await
                    {
                        warn!(
                            server = %stop_target.name,
                            error = %err,
                            "stop signal failed; still waiting for shutdown"
                        );
                    }
                });
            }
            StopFailurePolicy::Abort => {
                self.client
                    .send_power_signal(server, PowerSignal::Stop)
                    .await
                    .map_err(RestoreError::StopRejected)?;
            }
        }

        info!(server = %server.name, "waiting for server to stop");
        self.client
            .wait_for_state(server, PowerState::Offline, &self.policy)
            .await
            .map_err(RestoreError::StopConfirmation)?;

        info!(server = %server.name, "server stopped");
        self.client.request_backup_restore(server, backup_id).await
    }
}
