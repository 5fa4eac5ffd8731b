//! # Validator Directory
//!
//! **Component ID:** 2
//! **Architecture:** Hexagonal (domain / ports / adapters)
//!
//! ## Purpose
//!
//! Answers "which peer declares this consensus address, at which position,
//! and with which public key?" against the latest network snapshot.
//!
//! A peer lists its consensus addresses and keys as two parallel lists. The
//! first address is the peer's *primary* validator; the claim workflow only
//! accepts addresses at position 0.
//!
//! ```text
//! peers[0]: addresses = [A0, A1, A2]   keys = [K0, K1, K2]
//! peers[1]: addresses = [B0, B1]       keys = [L0, L1]
//!
//! resolve(A1) -> { peer_index: 0, position: 1, public_key: K1 }
//! resolve(B0) -> { peer_index: 1, position: 0, public_key: L0 }
//! resolve(C)  -> NotFound
//! ```
//!
//! ## Snapshot lifecycle
//!
//! ```text
//! NetworkClient ──network_info()──→ SnapshotRefresher ──replace()──→ SnapshotCache
//!                                   (every interval)                      │
//!                                                                latest() │
//!                                                   workflows ←───────────┘
//! ```
//!
//! A failed refresh keeps the previous snapshot. Resolutions may therefore
//! lag the network by up to one refresh interval.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{SnapshotCache, SnapshotRefresher};
pub use domain::{resolve, DirectoryError, Resolution};
pub use ports::SnapshotProvider;
