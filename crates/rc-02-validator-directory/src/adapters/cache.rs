use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::NetworkSnapshot;

use crate::ports::SnapshotProvider;

/// Holds the latest snapshot behind an `Arc` swap.
///
/// Readers clone the `Arc` and release the lock immediately, so a resolve
/// never waits on a refresh.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    current: RwLock<Arc<NetworkSnapshot>>,
}

impl SnapshotCache {
    /// Cache starting with an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache seeded with `snapshot`.
    pub fn with_snapshot(snapshot: NetworkSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Swap in a new snapshot.
    pub fn replace(&self, snapshot: NetworkSnapshot) {
        *self.current.write() = Arc::new(snapshot);
    }

    /// Returns true until a real snapshot has been stored.
    pub fn is_bootstrap(&self) -> bool {
        self.current.read().fetched_at.is_none()
    }
}

impl SnapshotProvider for SnapshotCache {
    fn latest(&self) -> Arc<NetworkSnapshot> {
        self.current.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::testing::peer;

    #[test]
    fn test_replace_does_not_disturb_held_snapshot() {
        let cache = SnapshotCache::with_snapshot(NetworkSnapshot::new(
            "testnet",
            vec![peer(&["a0"], &["k0"])],
        ));
        let held = cache.latest();

        cache.replace(NetworkSnapshot::new("testnet", vec![peer(&["b0"], &["l0"])]));

        assert_eq!(held.peers[0].consensus_addresses[0], "a0");
        assert_eq!(cache.resolve("b0").unwrap().public_key, "l0");
        assert!(cache.resolve("a0").is_err());
    }

    #[test]
    fn test_bootstrap_flag() {
        let cache = SnapshotCache::new();
        assert!(cache.is_bootstrap());
        cache.replace(NetworkSnapshot::new("testnet", vec![]));
        assert!(!cache.is_bootstrap());
    }
}
