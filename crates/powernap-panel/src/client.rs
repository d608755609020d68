//! PanelClient — authenticated HTTP client for the panel's client API.
//!
//! Holds the base URL and bearer token and issues single-attempt
//! requests. The client is `Clone` (reqwest's `Client` is an `Arc`
//! internally) and can be shared across tasks.

use powernap_core::{PanelConfig, PowerSignal, PowerState, ServerRef};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::{QueryError, RestoreError, SignalError};

/// Maximum number of characters of a response body kept for errors and
/// log lines.
const BODY_EXCERPT_CHARS: usize = 256;

/// Authenticated client for a single panel.
#[derive(Debug, Clone)]
pub struct PanelClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl PanelClient {
    /// Create a client from panel connection settings.
    ///
    /// The base URL is normalized so paths can be appended directly.
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
    }

    /// Send a power signal to a server.
    ///
    /// Single attempt: the panel answering anything other than 204 is a
    /// failure carrying the status and a body excerpt.
    pub async fn send_power_signal(
        &self,
        server: &ServerRef,
        signal: PowerSignal,
    ) -> Result<(), SignalError> {
        info!(
            server = %server.name,
            server_id = %server.server_id,
            "{} server",
            signal.verb()
        );

        let path = format!("/api/client/servers/{}/power", server.server_id);
        let response = self
            .post(&path)
            .json(&json!({ "signal": signal.wire() }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            info!(server = %server.name, signal = signal.wire(), "power signal accepted");
            return Ok(());
        }

        let body = excerpt(&response.text().await.unwrap_or_default());
        warn!(
            server = %server.name,
            signal = signal.wire(),
            status = %status,
            body = %body,
            "power signal rejected"
        );
        Err(SignalError::UnexpectedStatus { status, body })
    }

    /// Query the server's current power state.
    pub async fn power_state(&self, server: &ServerRef) -> Result<PowerState, QueryError> {
        let path = format!("/api/client/servers/{}/resources", server.server_id);
        let response = self.get(&path).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            warn!(
                server = %server.name,
                status = %status,
                body = %excerpt(&body),
                "status query rejected"
            );
            return Err(QueryError::UnexpectedStatus {
                status,
                body: excerpt(&body),
            });
        }

        let resources: ServerResources = serde_json::from_str(&body)?;
        Ok(PowerState::from_wire(&resources.attributes.current_state))
    }

    /// Ask the panel to restore a backup onto the server, truncating
    /// existing files first.
    ///
    /// Resolves once the panel has *accepted* the request (204); the
    /// restore itself runs remotely and is not awaited.
    pub async fn request_backup_restore(
        &self,
        server: &ServerRef,
        backup_id: &str,
    ) -> Result<(), RestoreError> {
        info!(server = %server.name, backup = %backup_id, "restoring from backup");

        let path = format!(
            "/api/client/servers/{}/backups/{}/restore",
            server.server_id, backup_id
        );
        let response = self
            .post(&path)
            .json(&json!({ "truncate": true }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            info!(server = %server.name, backup = %backup_id, "backup restore accepted");
            return Ok(());
        }

        let body = excerpt(&response.text().await.unwrap_or_default());
        warn!(
            server = %server.name,
            backup = %backup_id,
            status = %status,
            body = %body,
            "backup restore rejected"
        );
        Err(RestoreError::UnexpectedStatus { status, body })
    }
}

/// Response shape of the resource-status endpoint. Only the field this
/// subsystem reads is modeled.
#[derive(Debug, Deserialize)]
struct ServerResources {
    attributes: ResourceAttributes,
}

#[derive(Debug, Deserialize)]
struct ResourceAttributes {
    current_state: String,
}

/// Truncate a response body for error variants and log lines.
pub(crate) fn excerpt(body: &str) -> String {
    let mut taken = String::new();
    for (count, c) in body.chars().enumerate() {
        if count == BODY_EXCERPT_CHARS {
            taken.push_str("...");
            return taken;
        }
        taken.push(c);
    }
    taken
}
