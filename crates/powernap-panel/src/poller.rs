//! Wait-for-state poll loop.
//!
//! Queries a server's power state on a fixed interval until it reaches a
//! target, a query fails, or the deadline elapses. Queries within one
//! loop are strictly sequential; the deadline wraps the whole loop, so a
//! query still in flight when it fires is cancelled and its result
//! dropped. Exactly one terminal outcome per call.

use std::future::Future;

use powernap_core::{PollPolicy, PowerState, ServerRef};
use tracing::{debug, info, warn};

use crate::client::PanelClient;
use crate::error::{PollError, QueryError};

/// Poll `query` until it reports `target` or the policy's deadline fires.
///
/// One query is issued immediately on entry. A failed query ends the
/// loop; it is not retried. Generic over the query so the loop can be
/// exercised without a network.
pub(crate) async fn poll_until<F, Fut>(
    target: PowerState,
    policy: &PollPolicy,
    mut query: F,
) -> Result<(), PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PowerState, QueryError>>,
{
    let wait = async {
        loop {
            let state = query().await?;
            if state == target {
                return Ok(());
            }
            debug!(state = %state, target = %target, "target state not yet reached");
            tokio::time::sleep(policy.interval()).await;
        }
    };

    match tokio::time::timeout(policy.timeout(), wait).await {
        Ok(outcome) => outcome,
        Err(_) => Err(PollError::Timeout {
            target,
            timeout: policy.timeout(),
        }),
    }
}

impl PanelClient {
    /// Wait until the server reports the target power state.
    pub async fn wait_for_state(
        &self,
        server: &ServerRef,
        target: PowerState,
        policy: &PollPolicy,
    ) -> Result<(), PollError> {
        info!(server = %server.name, target = %target, "waiting for server state");

        let result = poll_until(target, policy, || self.power_state(server)).await;
        match &result {
            Ok(()) => {
                info!(server = %server.name, target = %target, "server reached target state");
            }
            Err(err) => {
                warn!(server = %server.name, target = %target, error = %err, "wait for state failed");
            }
        }
        result
    }
}
