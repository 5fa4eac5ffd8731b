//! Adapters for the Validator Directory.
//!
//! - `cache`: in-process snapshot holder implementing `SnapshotProvider`
//! - `refresher`: background task feeding the cache from a `NetworkClient`

pub mod cache;
pub mod refresher;

pub use cache::SnapshotCache;
pub use refresher::SnapshotRefresher;
