//! Address resolution over a peer snapshot.

use shared_types::NetworkSnapshot;

use super::errors::DirectoryError;

/// Where an address was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Index of the declaring peer in snapshot order.
    pub peer_index: usize,
    /// Zero-based position in that peer's address list.
    pub position: usize,
    /// Public key at the same position.
    pub public_key: String,
}

impl Resolution {
    /// Returns true for the peer's first declared address.
    pub fn is_primary(&self) -> bool {
        self.position == 0
    }
}

/// Find `target` in `snapshot`.
///
/// Peers are scanned in snapshot order and each address list in order; the
/// first exact match wins.
pub fn resolve(snapshot: &NetworkSnapshot, target: &str) -> Result<Resolution, DirectoryError> {
    for (peer_index, peer) in snapshot.peers.iter().enumerate() {
        let Some(position) = peer.consensus_addresses.iter().position(|a| a == target) else {
            continue;
        };

        return match peer.consensus_keys.get(position) {
            Some(key) => Ok(Resolution {
                peer_index,
                position,
                public_key: key.clone(),
            }),
            None => Err(DirectoryError::KeyMissing {
                address: target.to_string(),
                peer_index,
                position,
            }),
        };
    }

    Err(DirectoryError::NotFound(target.to_string()))
}
