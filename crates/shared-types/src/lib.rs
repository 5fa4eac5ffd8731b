//! # Shared Types Crate
//!
//! This crate contains the record entities, derived summaries and the
//! collaborator contracts shared by the record store and both workflows.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Injected Collaborators**: Workflows never reach for globals; every
//!   external system is an `Arc<dyn Trait>` handed in at construction.
//! - **Deadlines at the Seam**: Remote calls are bounded with
//!   [`with_deadline`] so a stuck collaborator cannot pin a key lock forever.

pub mod collaborators;
pub mod entities;
pub mod errors;
pub mod locks;
pub mod time;

#[cfg(feature = "testing")]
pub mod testing;

pub use collaborators::*;
pub use entities::*;
pub use errors::*;
pub use locks::{KeyGuard, KeyedLocks};
pub use time::{Clock, FixedClock, SystemClock};
