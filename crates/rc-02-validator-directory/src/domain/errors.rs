use thiserror::Error;

/// Resolver failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// No peer in the snapshot declares the address.
    #[error("peer does not exist with this address: {0}")]
    NotFound(String),

    /// The matched peer has no key at the matched position.
    #[error("peer {peer_index} declares {address} at position {position} without a public key")]
    KeyMissing {
        /// Address that matched.
        address: String,
        /// Index of the peer in the snapshot.
        peer_index: usize,
        /// Position in the peer's address list.
        position: usize,
    },
}
