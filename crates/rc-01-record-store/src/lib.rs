//! # Record Store
//!
//! **Component ID:** 1
//! **Architecture:** Hexagonal (domain / ports / adapters / service)
//!
//! ## Purpose
//!
//! The only durable state of the reward core and the only guard against
//! double payment. Holds three tables fully resident in memory and writes
//! each one through to durable storage on every mutation.
//!
//! | Table | Key | Entity |
//! |-------|-----|--------|
//! | `claimers` | testnet address | `ClaimRecord` |
//! | `incentive_parties` | social account id | `IncentiveParty` |
//! | `whitelist` | social account id | `WhitelistEntry` |
//!
//! ## Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | WRITE-ONCE-CLAIM | `claimed_tx_id` never changes once set | `service.rs` - `commit_claim_transaction()` |
//! | WRITE-ONCE-BOND | `bond_tx_id` never changes once set | `service.rs` - `commit_party_bond()` |
//! | UNIQUE-PARTY | One party per account id and per display name (case-insensitive) | `service.rs` - `insert_incentive_party()` |
//! | PROGRAM-CAP | Party count never exceeds the cap | `service.rs` - `insert_incentive_party()` |
//! | WRITE-THROUGH | Success is returned only after the table is durable | `service.rs` - `persist()` |
//! | NO-DIVERGENCE | A failed write rolls the in-memory table back | `service.rs` - every mutator |
//!
//! ## Module Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - JSON file documents, in-memory documents, dir lock │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - RecordStoreApi trait                       │
//! │  ports/outbound.rs - DocumentStorage trait                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/ - StoreError, Table kinds                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryDocuments, JsonFileDocuments};
pub use domain::{StoreError, Table};
pub use ports::{DocumentStorage, RecordStoreApi};
pub use service::RecordStore;
