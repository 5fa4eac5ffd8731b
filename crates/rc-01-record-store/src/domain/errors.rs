//! Record store error types.

use thiserror::Error;

use super::tables::Table;

/// Record store error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No claim record for this testnet address.
    #[error("testnet address not found: {0}")]
    ClaimNotFound(String),

    /// No booster party for this account.
    #[error("booster party not found: {0}")]
    PartyNotFound(String),

    /// A different transaction is already recorded (write-once).
    #[error("{key} already has transaction {tx_id}")]
    AlreadyClaimed {
        /// Record key.
        key: String,
        /// Transaction already on record.
        tx_id: String,
    },

    /// Refused to record an empty transaction id.
    #[error("transaction id must not be empty")]
    EmptyTxId,

    /// Account is already on the whitelist.
    #[error("the account `{0}` is already whitelisted")]
    AlreadyWhitelisted(String),

    /// A party with this account id or display name exists.
    #[error("a booster party already exists for `{0}`")]
    DuplicateParty(String),

    /// The program cap has been reached.
    #[error("booster program is full ({cap} parties)")]
    ProgramFull {
        /// Configured cap.
        cap: usize,
    },

    /// Table could not be loaded at startup.
    #[error("failed to load {table}: {reason}")]
    Load {
        /// Table being loaded.
        table: Table,
        /// Underlying cause.
        reason: String,
    },

    /// Table could not be written. The in-memory table was rolled back.
    #[error("failed to persist {table}: {reason}")]
    Persist {
        /// Table being written.
        table: Table,
        /// Underlying cause.
        reason: String,
    },

    /// Data directory is held by another process.
    #[error("data directory locked: {0}")]
    Locked(String),
}

impl StoreError {
    /// Returns true for durable-write failures.
    pub fn is_persist(&self) -> bool {
        matches!(self, Self::Persist { .. })
    }
}
