//! Error types for the booster engine.

use rc_01_record_store::StoreError;
use shared_types::CollaboratorError;
use thiserror::Error;

/// Booster rejections and failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoosterError {
    /// The program reached its party cap.
    #[error("program is finished")]
    ProgramFinished,

    /// The account already has a package.
    #[error("the account `{0}` already has a booster package")]
    DuplicateParty(String),

    /// The mainnet address is already a validator.
    #[error("this address is already a staked validator")]
    AlreadyStaked,

    /// Profile lookup failed; carries the social client's error.
    #[error(transparent)]
    AccountNotFound(CollaboratorError),

    /// Unverified account younger than the minimum age.
    #[error("the account must be at least {min_years} years old")]
    AccountTooNew {
        /// Required age.
        min_years: u32,
    },

    /// Unverified account with too few followers.
    #[error("the account must have at least {min} followers")]
    InsufficientFollowers {
        /// Required followers.
        min: u64,
    },

    /// No announcement share found for the requester.
    #[error("please retweet the announcement first ({0})")]
    RetweetNotFound(CollaboratorError),

    /// The share is older than the window.
    #[error("the retweet must be at most {max_age_days} days old")]
    RetweetTooOld {
        /// Window in days.
        max_age_days: u32,
    },

    /// The invoice could not be created.
    #[error("payment could not be created: {0}")]
    PaymentFailed(CollaboratorError),

    /// The account is already whitelisted.
    #[error("the account `{0}` is already whitelisted")]
    AlreadyWhitelisted(String),

    /// No package for the handle.
    #[error("no booster package found for `{0}`")]
    PartyNotFound(String),

    /// The package has not been paid yet.
    #[error("payment for `{0}` has not been settled")]
    PaymentNotSettled(String),

    /// The package was already bonded.
    #[error("booster stake already bonded in transaction {tx_id}")]
    AlreadyClaimed {
        /// Recorded transaction.
        tx_id: String,
    },

    /// No connected peer declares the party's address.
    #[error("peer does not exist with this address: {0}")]
    PeerNotFound(String),

    /// The declaring peer published no key for the address.
    #[error("no public key published for {0}")]
    KeyMissing(String),

    /// The address is not the peer's first validator.
    #[error("please enter the first validator address")]
    NotPrimaryAddress,

    /// The service wallet is below its reserve.
    #[error("insufficient wallet balance")]
    InsufficientBalance,

    /// The signer returned no transaction id.
    #[error("can't send bond transaction")]
    TransactionSendFailed,

    /// A collaborator failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// The store failed.
    #[error(transparent)]
    Store(StoreError),

    /// The bond was broadcast but could not be recorded.
    #[error("booster bond {tx_id} for {account_id} was sent but not recorded: {reason}")]
    Unrecoverable {
        /// Party account id.
        account_id: String,
        /// Broadcast transaction.
        tx_id: String,
        /// Why the commit failed.
        reason: String,
    },
}

impl From<StoreError> for BoosterError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ProgramFull { .. } => Self::ProgramFinished,
            StoreError::DuplicateParty(key) => Self::DuplicateParty(key),
            StoreError::AlreadyWhitelisted(id) => Self::AlreadyWhitelisted(id),
            StoreError::PartyNotFound(id) => Self::PartyNotFound(id),
            other => Self::Store(other),
        }
    }
}

impl BoosterError {
    /// Funds moved without a durable record. Operators must be alerted.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, Self::Unrecoverable { .. })
    }

    /// A rejection whose message can be shown to the requester.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Self::Collaborator(_) | Self::Store(_) | Self::Unrecoverable { .. }
        )
    }
}
