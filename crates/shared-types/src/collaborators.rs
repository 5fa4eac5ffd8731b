//! # Collaborator Contracts
//!
//! Outbound contracts for the systems the core consumes but does not own.
//!
//! | Trait | Upstream | Used by |
//! |-------|----------|---------|
//! | `NetworkClient` | Blockchain RPC | Directory refresher, both workflows |
//! | `WalletSigner` | Bot wallet | Claim workflow, booster claim |
//! | `SocialClient` | Social-media API | Booster engine |
//! | `PaymentGateway` | Payment processor | Booster engine |

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::entities::{
    Amount, InvoiceSpec, NetworkSnapshot, PaymentReceipt, RetweetInfo, SocialProfile,
    ValidatorInfo,
};
use crate::errors::CollaboratorError;

/// Blockchain RPC client.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Current connected-peer snapshot.
    async fn network_info(&self) -> Result<NetworkSnapshot, CollaboratorError>;

    /// Validator registered under `address`.
    ///
    /// `NotFound` is an ordinary answer meaning the address is not a validator.
    async fn validator_info(&self, address: &str) -> Result<ValidatorInfo, CollaboratorError>;

    /// Account balance of `address`.
    async fn balance(&self, address: &str) -> Result<Amount, CollaboratorError>;
}

/// Wallet that signs and broadcasts on behalf of the service.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Spendable balance of the service wallet.
    async fn balance(&self) -> Result<Amount, CollaboratorError>;

    /// Build, sign and broadcast a bond transaction. Returns the tx id.
    async fn bond_transaction(
        &self,
        public_key: &str,
        validator_address: &str,
        memo: &str,
        amount: Amount,
    ) -> Result<String, CollaboratorError>;
}

/// Social-media API client.
#[async_trait]
pub trait SocialClient: Send + Sync {
    /// Profile of `handle`.
    async fn user_info(&self, handle: &str) -> Result<SocialProfile, CollaboratorError>;

    /// The promotional-post share by `handle`, tagged with `requester_id`.
    async fn retweet_search(
        &self,
        requester_id: &str,
        handle: &str,
    ) -> Result<RetweetInfo, CollaboratorError>;
}

/// Payment processor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an invoice.
    async fn create_payment(&self, invoice: InvoiceSpec)
        -> Result<PaymentReceipt, CollaboratorError>;
}

/// Bound a collaborator call with a deadline.
///
/// Expiry maps to [`CollaboratorError::Timeout`]; the inner future is dropped.
pub async fn with_deadline<T, F>(
    operation: &'static str,
    deadline: Duration,
    call: F,
) -> Result<T, CollaboratorError>
where
    F: Future<Output = Result<T, CollaboratorError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, after_secs = deadline.as_secs(), "collaborator call timed out");
            Err(CollaboratorError::Timeout {
                operation,
                after_secs: deadline.as_secs(),
            })
        }
    }
}
