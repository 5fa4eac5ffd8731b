//! Booster program configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Memo attached to every booster bond.
pub const DEFAULT_BOOSTER_MEMO: &str = "Validator Booster Program";

/// Booster program configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoosterConfig {
    /// Maximum number of parties.
    pub program_cap: usize,
    /// Minimum account age for unverified accounts.
    pub min_account_age_years: u32,
    /// Minimum followers for unverified accounts.
    pub min_followers: u64,
    /// Follower count that unlocks the larger package.
    pub high_follower_threshold: u64,
    /// Package size below the threshold, in PAC.
    pub pac_standard: i64,
    /// Package size at or above the threshold, in PAC.
    pub pac_high: i64,
    /// Oldest accepted retweet.
    pub retweet_max_age_days: u32,
    /// Memo attached to the bond transaction.
    pub memo: String,
    /// Minimum wallet balance before a booster bond is attempted.
    pub min_wallet_reserve: Amount,
    /// Deadline for each collaborator call.
    pub call_timeout: Duration,
}

impl Default for BoosterConfig {
    fn default() -> Self {
        Self {
            program_cap: 500,
            min_account_age_years: 2,
            min_followers: 200,
            high_follower_threshold: 1000,
            pac_standard: 150,
            pac_high: 200,
            retweet_max_age_days: 7,
            memo: DEFAULT_BOOSTER_MEMO.to_string(),
            min_wallet_reserve: Amount::from_pac(500),
            call_timeout: Duration::from_secs(30),
        }
    }
}

impl BoosterConfig {
    /// Defaults with a small cap and a short call deadline.
    pub fn for_testing() -> Self {
        Self {
            program_cap: 5,
            call_timeout: Duration::from_secs(2),
            ..Self::default()
        }
    }
}
