//! # Claim Workflow
//!
//! **Component ID:** 3
//!
//! ## Purpose
//!
//! Turns a testnet reward allocation into a stake bonded to the claimer's
//! mainnet validator, at most once per testnet address.
//!
//! ## Pipeline
//!
//! ```text
//! claim(requester, testnet_addr, mainnet_addr)
//!   │
//!   ├─ 1. validator_info(mainnet_addr) staked?       → AlreadyStaked
//!   ├─ 2. wallet balance < reserve?                  → InsufficientBalance
//!   │  ┌──────────── per-testnet-address lock ────────────┐
//!   ├─ │ 3. lookup_claim(testnet_addr) missing?        → ClaimerNotFound
//!   ├─ │ 4. owner != requester?                        → InvalidClaimer
//!   ├─ │ 5. already claimed?                           → AlreadyClaimed
//!   ├─ │ 6. resolve(mainnet_addr)                      → PeerNotFound / NotPrimaryAddress
//!   ├─ │ 7. bond_transaction(key, addr, memo, reward)  → TransactionSendFailed
//!   └─ │ 8. commit_claim_transaction                   → Unrecoverable
//!      └──────────────────────────────────────────────────┘
//! ```
//!
//! Checks short-circuit in this order. Once step 7 has returned a
//! transaction id, funds have moved; a failure to record it is reported as
//! [`ClaimError::Unrecoverable`] and must be handled as an alert.

pub mod config;
pub mod error;
pub mod service;

pub use config::ClaimConfig;
pub use error::ClaimError;
pub use service::ClaimService;
