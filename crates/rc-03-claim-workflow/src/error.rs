//! Error types for the claim workflow.

use shared_types::CollaboratorError;
use thiserror::Error;

/// Claim rejections and failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// The mainnet address already runs a staked validator.
    #[error("this address is already a staked validator")]
    AlreadyStaked,

    /// The service wallet is below its reserve.
    #[error("insufficient wallet balance")]
    InsufficientBalance,

    /// No allocation for the testnet address.
    #[error("claimer not found")]
    ClaimerNotFound,

    /// The requester does not own the allocation.
    #[error("invalid claimer")]
    InvalidClaimer,

    /// The allocation was already bonded.
    #[error("this reward was already claimed in transaction {tx_id}")]
    AlreadyClaimed {
        /// Recorded transaction.
        tx_id: String,
    },

    /// No connected peer declares the mainnet address.
    #[error("peer does not exist with this address: {0}")]
    PeerNotFound(String),

    /// The declaring peer published no key for the address.
    #[error("no public key published for {0}")]
    KeyMissing(String),

    /// The address is not the peer's first validator.
    #[error("please enter the first validator address")]
    NotPrimaryAddress,

    /// The signer returned no transaction id.
    #[error("can't send bond transaction")]
    TransactionSendFailed,

    /// A collaborator failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// The bond was broadcast but could not be recorded.
    #[error("bond transaction {tx_id} for {testnet_addr} was sent but not recorded: {reason}")]
    Unrecoverable {
        /// Claimed testnet address.
        testnet_addr: String,
        /// Broadcast transaction.
        tx_id: String,
        /// Why the commit failed.
        reason: String,
    },
}

impl ClaimError {
    /// Funds moved without a durable record. Operators must be alerted.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, Self::Unrecoverable { .. })
    }

    /// A validation rejection whose message can be shown to the requester.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Collaborator(_) | Self::Unrecoverable { .. })
    }
}
