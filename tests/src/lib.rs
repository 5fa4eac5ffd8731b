//! # Pac Reward Core Test Suite
//!
//! Cross-component flows run against a real data directory.
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs       # data directory + collaborator doubles
//!     ├── claim_flow.rs     # claim end to end, concurrency, restart
//!     └── booster_flow.rs   # payment → settle → bond, whitelist, cap
//! ```
//!
//! ```bash
//! cargo test -p rc-tests
//! ```

pub mod integration;
