//! Memory-limit aggregation across panel servers.
//!
//! Queries the panel's server list once and sums the declared memory
//! limit of the requested servers. All-or-nothing: a rejected request or
//! a malformed record fails the whole call, never a partial sum.

use std::collections::HashSet;

use powernap_core::ServerId;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::client::{PanelClient, excerpt};
use crate::error::AggregationError;

/// Response shape of the server list endpoint. Only the fields this
/// subsystem reads are modeled; a record missing any of them is a parse
/// failure.
#[derive(Debug, Deserialize)]
struct ServerList {
    data: Vec<ServerEntry>,
}

#[derive(Debug, Deserialize)]
struct ServerEntry {
    attributes: ServerAttributes,
}

#[derive(Debug, Deserialize)]
struct ServerAttributes {
    identifier: ServerId,
    limits: ServerLimits,
}

#[derive(Debug, Deserialize)]
struct ServerLimits {
    /// Declared memory limit, in the panel's unit (MiB).
    memory: u64,
}

impl PanelClient {
    /// Sum the declared memory limit across the given servers.
    ///
    /// The list endpoint returns every server visible to the credential;
    /// records are filtered client-side by identifier rather than
    /// trusting the endpoint to scope them, so servers outside the given
    /// set never contribute to the total.
    pub async fn total_memory_limit(
        &self,
        servers: &HashSet<ServerId>,
    ) -> Result<u64, AggregationError> {
        let response = self.get("/api/client/servers/").send().await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            warn!(
                status = %status,
                body = %excerpt(&body),
                "server list query rejected"
            );
            return Err(AggregationError::UnexpectedStatus {
                status,
                body: excerpt(&body),
            });
        }

        let list: ServerList = serde_json::from_str(&body)?;
        let total = sum_memory(&list, servers);
        debug!(servers = servers.len(), total, "memory limits aggregated");
        Ok(total)
    }
}

fn sum_memory(list: &ServerList, servers: &HashSet<ServerId>) -> u64 {
    list.data
        .iter()
        .filter(|entry| servers.contains(&entry.attributes.identifier))
        .map(|entry| entry.attributes.limits.memory)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(entries: &[(&str, u64)]) -> ServerList {
        ServerList {
            data: entries
                .iter()
                .map(|(id, memory)| ServerEntry {
                    attributes: ServerAttributes {
                        identifier: (*id).to_string(),
                        limits: ServerLimits { memory: *memory },
                    },
                })
                .collect(),
        }
    }

    fn ids(ids: &[&str]) -> HashSet<ServerId> {
        ids.iter().map(|id| (*id).to_string()).collect()
    }

    #[test]
    fn sums_matching_records() {
        let list = list_of(&[("a", 512), ("b", 1024), ("c", 2048)]);
        assert_eq!(sum_memory(&list, &ids(&["a", "b", "c"])), 3584);
    }

    #[test]
    fn empty_list_sums_to_zero() {
        let list = list_of(&[]);
        assert_eq!(sum_memory(&list, &ids(&["a"])), 0);
    }

    #[test]
    fn records_outside_the_set_are_excluded() {
        let list = list_of(&[("a", 512), ("other", 4096)]);
        assert_eq!(sum_memory(&list, &ids(&["a"])), 512);
    }

    #[test]
    fn list_parses_panel_shape() {
        let body = r#"{
            "object": "list",
            "data": [
                {
                    "object": "server",
                    "attributes": {
                        "identifier": "1a2b3c4d",
                        "name": "lobby",
                        "limits": { "memory": 1024, "swap": 0, "disk": 10240 }
                    }
                }
            ]
        }"#;
        let list: ServerList = serde_json::from_str(body).unwrap();
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].attributes.limits.memory, 1024);
    }

    #[test]
    fn record_missing_memory_fails_to_parse() {
        let body = r#"{
            "data": [
                { "attributes": { "identifier": "1a2b3c4d", "limits": {} } }
            ]
        }"#;
        assert!(serde_json::from_str::<ServerList>(body).is_err());
    }
}
