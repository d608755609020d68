//! Per-server operation leases.
//!
//! The panel itself does not serialize operations: two concurrent
//! restore sequences against the same server race with undefined
//! results. The lease registry closes that gap for callers that opt in
//! (the `Restorer` does): at most one leased operation per server at a
//! time, released when the guard drops.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use powernap_core::ServerId;
use tracing::debug;

/// Registry of servers with an exclusive operation in flight.
///
/// Clonable; clones share the same underlying set.
#[derive(Debug, Clone, Default)]
pub struct OperationLeases {
    held: Arc<Mutex<HashSet<ServerId>>>,
}

impl OperationLeases {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the lease for a server.
    ///
    /// Returns `None` if an operation is already in flight for it. The
    /// returned guard releases the lease on drop, on every exit path.
    pub fn acquire(&self, server_id: &ServerId) -> Option<LeaseGuard> {
        let mut held = self.held.lock().unwrap();
        if !held.insert(server_id.clone()) {
            debug!(%server_id, "operation lease already held");
            return None;
        }
        Some(LeaseGuard {
            server_id: server_id.clone(),
            held: Arc::clone(&self.held),
        })
    }

    /// Whether a lease is currently held for the server.
    pub fn is_held(&self, server_id: &ServerId) -> bool {
        self.held.lock().unwrap().contains(server_id)
    }
}

/// RAII handle for a claimed lease.
#[derive(Debug)]
pub struct LeaseGuard {
    server_id: ServerId,
    held: Arc<Mutex<HashSet<ServerId>>>,
}

impl Drop for LeaseGuard {
    fn drop(&mut self) {
        if let Ok(mut held) = self.held.lock() {
            held.remove(&self.server_id);
        }
    }
}
