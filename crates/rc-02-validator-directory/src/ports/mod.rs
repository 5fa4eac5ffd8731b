//! Ports layer for the Validator Directory.

use std::sync::Arc;

use shared_types::NetworkSnapshot;

use crate::domain::{resolve, DirectoryError, Resolution};

/// Source of the latest network snapshot.
pub trait SnapshotProvider: Send + Sync {
    /// Latest snapshot. Cheap; never blocks on the network.
    fn latest(&self) -> Arc<NetworkSnapshot>;

    /// Resolve `address` against [`SnapshotProvider::latest`].
    fn resolve(&self, address: &str) -> Result<Resolution, DirectoryError> {
        resolve(&self.latest(), address)
    }
}
