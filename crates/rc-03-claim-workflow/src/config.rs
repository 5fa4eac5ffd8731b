//! Claim workflow configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Memo attached to every claim bond.
pub const DEFAULT_CLAIM_MEMO: &str = "TestNet reward claim from RoboPac";

/// Wallet reserve below which claims are refused, in PAC.
pub const DEFAULT_MIN_WALLET_RESERVE_PAC: i64 = 500;

/// Default deadline for each collaborator call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Claim workflow configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimConfig {
    /// Minimum wallet balance before a claim is attempted.
    pub min_wallet_reserve: Amount,
    /// Memo attached to the bond transaction.
    pub memo: String,
    /// Deadline for each collaborator call.
    pub call_timeout: Duration,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            min_wallet_reserve: Amount::from_pac(DEFAULT_MIN_WALLET_RESERVE_PAC),
            memo: DEFAULT_CLAIM_MEMO.to_string(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl ClaimConfig {
    /// Defaults with a short call deadline.
    pub fn for_testing() -> Self {
        Self {
            call_timeout: Duration::from_secs(2),
            ..Self::default()
        }
    }
}
