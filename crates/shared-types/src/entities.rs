//! # Core Domain Entities
//!
//! Defines the durable records owned by the record store, the summaries
//! derived from them and the shapes returned by external collaborators.
//!
//! ## Clusters
//!
//! - **Money**: `Amount`
//! - **Claims**: `ClaimRecord`, `ClaimStatusSummary`
//! - **Booster Program**: `IncentiveParty`, `WhitelistEntry`, `BoosterStatusSummary`
//! - **Network**: `PeerInfo`, `NetworkSnapshot`, `ValidatorInfo`
//! - **Social / Payments**: `SocialProfile`, `RetweetInfo`, `InvoiceSpec`, `PaymentReceipt`

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: MONEY
// =============================================================================

/// Number of change units in one PAC.
pub const CHANGE_PER_PAC: i64 = 1_000_000_000;

/// An amount in the smallest currency unit ("change").
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Zero change.
    pub const ZERO: Amount = Amount(0);

    /// Wrap a raw change value.
    pub const fn from_change(change: i64) -> Self {
        Self(change)
    }

    /// Convert whole PAC coins to change. Saturates instead of wrapping.
    pub const fn from_pac(coins: i64) -> Self {
        Self(coins.saturating_mul(CHANGE_PER_PAC))
    }

    /// Raw change value.
    pub const fn change(self) -> i64 {
        self.0
    }

    /// Value in PAC, for display only.
    pub fn as_pac(self) -> f64 {
        self.0 as f64 / CHANGE_PER_PAC as f64
    }

    /// Returns true for zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Saturating addition used by summaries.
    pub const fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} PAC", self.as_pac())
    }
}

// =============================================================================
// CLUSTER B: CLAIMS
// =============================================================================

/// A testnet reward allocation, keyed by testnet address in the store.
///
/// `claimed_tx_id` is write-once: empty means unclaimed, and once set it is
/// never changed or cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Chat-platform user id of the owner.
    pub owner_id: String,
    /// Total reward, in change units.
    pub total_reward: Amount,
    /// Bonding transaction id; empty while unclaimed.
    #[serde(default)]
    pub claimed_tx_id: String,
}

impl ClaimRecord {
    /// Create an unclaimed record.
    pub fn new(owner_id: impl Into<String>, total_reward: Amount) -> Self {
        Self {
            owner_id: owner_id.into(),
            total_reward,
            claimed_tx_id: String::new(),
        }
    }

    /// Returns true once a bonding transaction has been recorded.
    pub fn is_claimed(&self) -> bool {
        !self.claimed_tx_id.is_empty()
    }
}

/// Aggregate over all claim records. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClaimStatusSummary {
    /// Records with a bonding transaction.
    pub claimed: u64,
    /// Sum of claimed rewards.
    pub claimed_amount: Amount,
    /// Records still waiting for a claim.
    pub unclaimed: u64,
    /// Sum of unclaimed rewards.
    pub unclaimed_amount: Amount,
}

impl ClaimStatusSummary {
    /// Fold one record into the summary.
    pub fn record(&mut self, claim: &ClaimRecord) {
        if claim.is_claimed() {
            self.claimed += 1;
            self.claimed_amount = self.claimed_amount.saturating_add(claim.total_reward);
        } else {
            self.unclaimed += 1;
            self.unclaimed_amount = self.unclaimed_amount.saturating_add(claim.total_reward);
        }
    }

    /// Total number of records.
    pub fn total(&self) -> u64 {
        self.claimed + self.unclaimed
    }
}

// =============================================================================
// CLUSTER C: BOOSTER PROGRAM
// =============================================================================

/// An approved booster participant, keyed by social account id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveParty {
    /// Social-media account id.
    pub account_id: String,
    /// Social-media display name (handle). Unique case-insensitively.
    pub display_name: String,
    /// Chat-platform user id of the requester.
    pub owner_id: String,
    /// Mainnet validator address the stake is bonded to.
    pub validator_address: String,
    /// PAC granted, in whole coins.
    pub pac_amount: i64,
    /// USD price charged for the package.
    pub usd_price: u32,
    /// Flipped by the payment-confirmation callback.
    #[serde(default)]
    pub payment_settled: bool,
    /// Bonding transaction id; write-once, empty until claimed.
    #[serde(default)]
    pub bond_tx_id: String,
    /// Invoice id returned by the payment gateway.
    #[serde(default)]
    pub invoice_id: String,
    /// Link the requester pays through.
    #[serde(default)]
    pub payment_link: String,
    /// When the party was approved.
    pub created_at: DateTime<Utc>,
}

impl IncentiveParty {
    /// Returns true once the stake has been bonded.
    pub fn is_bonded(&self) -> bool {
        !self.bond_tx_id.is_empty()
    }

    /// Granted stake as an amount.
    pub fn stake(&self) -> Amount {
        Amount::from_pac(self.pac_amount)
    }
}

/// An account allowed to bypass the age and follower gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    /// Social-media account id.
    pub account_id: String,
    /// Display name at the time of whitelisting.
    pub display_name: String,
    /// Chat-platform user id of whoever authorized it.
    pub authorized_by: String,
}

/// Aggregate over parties and whitelist entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoosterStatusSummary {
    /// Number of approved parties.
    pub total_parties: usize,
    /// PAC granted across all parties.
    pub total_pac: i64,
    /// USD priced across all parties.
    pub total_usd: u64,
    /// Parties whose payment settled.
    pub payments_settled: usize,
    /// Parties still waiting for payment.
    pub payments_waiting: usize,
    /// Parties whose stake has been bonded.
    pub bonded: usize,
    /// Parties not bonded yet.
    pub unbonded: usize,
    /// Whitelisted accounts.
    pub whitelisted: usize,
}

impl BoosterStatusSummary {
    /// Fold one party into the summary.
    pub fn record(&mut self, party: &IncentiveParty) {
        self.total_parties += 1;
        self.total_pac = self.total_pac.saturating_add(party.pac_amount);
        self.total_usd += u64::from(party.usd_price);
        if party.payment_settled {
            self.payments_settled += 1;
        } else {
            self.payments_waiting += 1;
        }
        if party.is_bonded() {
            self.bonded += 1;
        } else {
            self.unbonded += 1;
        }
    }
}

// =============================================================================
// CLUSTER D: NETWORK
// =============================================================================

/// A connected peer as reported by the network client.
///
/// `consensus_addresses` and `consensus_keys` are parallel lists: the key at
/// position `i` belongs to the address at position `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    /// Peer id, opaque.
    #[serde(default)]
    pub peer_id: String,
    /// Node agent string.
    #[serde(default)]
    pub agent: String,
    /// Declared consensus addresses, primary first.
    #[serde(default)]
    pub consensus_addresses: Vec<String>,
    /// Consensus public keys, parallel to `consensus_addresses`.
    #[serde(default)]
    pub consensus_keys: Vec<String>,
}

/// Ordered peer list captured from the network at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Network name.
    #[serde(default)]
    pub network_name: String,
    /// Peers in the order the network client returned them.
    #[serde(default)]
    pub peers: Vec<PeerInfo>,
    /// When the snapshot was taken. `None` for the empty bootstrap snapshot.
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl NetworkSnapshot {
    /// Snapshot with the given peers, stamped now.
    pub fn new(network_name: impl Into<String>, peers: Vec<PeerInfo>) -> Self {
        Self {
            network_name: network_name.into(),
            peers,
            fetched_at: Some(Utc::now()),
        }
    }
}

/// Validator state on the mainnet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    /// Validator address.
    pub address: String,
    /// Validator public key.
    pub public_key: String,
    /// Bonded stake.
    pub stake: Amount,
    /// Validator number.
    pub number: i32,
}

// =============================================================================
// CLUSTER E: SOCIAL / PAYMENTS
// =============================================================================

/// Social-media profile as returned by the social client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfile {
    /// Stable account id.
    pub account_id: String,
    /// Display name (handle).
    pub display_name: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Follower count.
    pub followers: u64,
    /// Platform verification badge.
    pub verified: bool,
}

/// The requester's share of the promotional post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetweetInfo {
    /// Id of the retweet.
    pub tweet_id: String,
    /// When it was posted.
    pub created_at: DateTime<Utc>,
}

/// Invoice request handed to the payment gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSpec {
    /// Merchant-side order id.
    pub order_id: String,
    /// Price in USD.
    pub price_usd: u32,
    /// Human readable description.
    pub description: String,
}

/// Gateway acknowledgement of a created invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Gateway invoice id.
    pub invoice_id: String,
    /// Link the payer follows.
    pub payment_link: String,
}
