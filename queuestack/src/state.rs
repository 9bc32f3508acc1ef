//! Shared application state

use std::sync::{Arc, PoisonError, RwLock};

use crate::topology::Topology;

/// Holds the currently installed topology.
///
/// A bootstrap builds a whole topology off to the side; installing it swaps
/// one pointer under the lock. Readers observe either the previous graph or
/// the complete new one, never a half-built mix, and a failed bootstrap
/// leaves the installed topology untouched.
#[derive(Debug)]
pub struct AppState {
    topology: RwLock<Arc<Topology>>,
}

impl AppState {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology: RwLock::new(Arc::new(topology)),
        }
    }

    /// Snapshot of the current topology.
    pub fn topology(&self) -> Arc<Topology> {
        self.topology
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the installed topology with a freshly bootstrapped one.
    pub fn install(&self, topology: Topology) {
        *self
            .topology
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(topology);
    }
}
