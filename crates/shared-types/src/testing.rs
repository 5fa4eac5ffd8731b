//! # Collaborator Doubles
//!
//! Scriptable in-memory collaborators for workflow and integration tests.
//! Enabled with the `testing` feature.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::collaborators::{NetworkClient, PaymentGateway, SocialClient, WalletSigner};
use crate::entities::{
    Amount, InvoiceSpec, NetworkSnapshot, PaymentReceipt, PeerInfo, RetweetInfo, SocialProfile,
    ValidatorInfo,
};
use crate::errors::CollaboratorError;

/// Build a peer from parallel address/key lists.
pub fn peer(addresses: &[&str], keys: &[&str]) -> PeerInfo {
    PeerInfo {
        peer_id: String::new(),
        agent: String::new(),
        consensus_addresses: addresses.iter().map(|a| a.to_string()).collect(),
        consensus_keys: keys.iter().map(|k| k.to_string()).collect(),
    }
}

// =============================================================================
// NETWORK
// =============================================================================

/// Network client double.
#[derive(Default)]
pub struct MockNetworkClient {
    snapshot: Mutex<NetworkSnapshot>,
    validators: Mutex<HashMap<String, ValidatorInfo>>,
    balances: Mutex<HashMap<String, Amount>>,
    network_failure: Mutex<Option<CollaboratorError>>,
    validator_calls: AtomicUsize,
}

impl MockNetworkClient {
    /// Empty network: no peers, no validators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `peers` from `network_info`.
    pub fn with_peers(self, peers: Vec<PeerInfo>) -> Self {
        *self.snapshot.lock() = NetworkSnapshot::new("testnet", peers);
        self
    }

    /// Register a staked validator.
    pub fn with_validator(self, address: &str, stake: Amount) -> Self {
        self.validators.lock().insert(
            address.to_string(),
            ValidatorInfo {
                address: address.to_string(),
                public_key: String::new(),
                stake,
                number: 1,
            },
        );
        self
    }

    /// Replace the served snapshot.
    pub fn set_peers(&self, peers: Vec<PeerInfo>) {
        *self.snapshot.lock() = NetworkSnapshot::new("testnet", peers);
    }

    /// Make `network_info` fail until cleared with `None`.
    pub fn set_network_failure(&self, failure: Option<CollaboratorError>) {
        *self.network_failure.lock() = failure;
    }

    /// Number of `validator_info` calls seen.
    pub fn validator_calls(&self) -> usize {
        self.validator_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkClient for MockNetworkClient {
    async fn network_info(&self) -> Result<NetworkSnapshot, CollaboratorError> {
        if let Some(err) = self.network_failure.lock().clone() {
            return Err(err);
        }
        Ok(self.snapshot.lock().clone())
    }

    async fn validator_info(&self, address: &str) -> Result<ValidatorInfo, CollaboratorError> {
        self.validator_calls.fetch_add(1, Ordering::SeqCst);
        self.validators
            .lock()
            .get(address)
            .cloned()
            .ok_or_else(|| CollaboratorError::NotFound(format!("validator {address}")))
    }

    async fn balance(&self, address: &str) -> Result<Amount, CollaboratorError> {
        Ok(self
            .balances
            .lock()
            .get(address)
            .copied()
            .unwrap_or_default())
    }
}

// =============================================================================
// WALLET
// =============================================================================

/// A bond request the wallet double received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondCall {
    /// Public key passed in.
    pub public_key: String,
    /// Validator address passed in.
    pub validator_address: String,
    /// Memo passed in.
    pub memo: String,
    /// Amount passed in.
    pub amount: Amount,
}

/// Wallet double. Returns scripted tx ids, then `tx-<n>`.
pub struct MockWallet {
    balance: Mutex<Amount>,
    scripted: Mutex<VecDeque<Result<String, CollaboratorError>>>,
    bonds: Mutex<Vec<BondCall>>,
    delay: Mutex<Duration>,
}

impl MockWallet {
    /// Wallet holding `balance`.
    pub fn with_balance(balance: Amount) -> Self {
        Self {
            balance: Mutex::new(balance),
            scripted: Mutex::new(VecDeque::new()),
            bonds: Mutex::new(Vec::new()),
            delay: Mutex::new(Duration::ZERO),
        }
    }

    /// Queue the result of the next bond call.
    pub fn push_bond_result(&self, result: Result<String, CollaboratorError>) {
        self.scripted.lock().push_back(result);
    }

    /// Sleep this long inside every bond call.
    pub fn set_bond_delay(&self, delay: Duration) {
        *self.delay.lock() = delay;
    }

    /// Every bond request received so far.
    pub fn bonds(&self) -> Vec<BondCall> {
        self.bonds.lock().clone()
    }
}

#[async_trait]
impl WalletSigner for MockWallet {
    async fn balance(&self) -> Result<Amount, CollaboratorError> {
        Ok(*self.balance.lock())
    }

    async fn bond_transaction(
        &self,
        public_key: &str,
        validator_address: &str,
        memo: &str,
        amount: Amount,
    ) -> Result<String, CollaboratorError> {
        let delay = *self.delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let sequence = {
            let mut bonds = self.bonds.lock();
            bonds.push(BondCall {
                public_key: public_key.to_string(),
                validator_address: validator_address.to_string(),
                memo: memo.to_string(),
                amount,
            });
            bonds.len()
        };

        match self.scripted.lock().pop_front() {
            Some(result) => result,
            None => Ok(format!("tx-{sequence}")),
        }
    }
}

// =============================================================================
// SOCIAL
// =============================================================================

/// Social client double keyed by lower-cased handle.
#[derive(Default)]
pub struct MockSocialClient {
    profiles: Mutex<HashMap<String, SocialProfile>>,
    retweets: Mutex<HashMap<String, RetweetInfo>>,
}

impl MockSocialClient {
    /// No profiles, no retweets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `profile` for its display name.
    pub fn with_profile(self, profile: SocialProfile) -> Self {
        self.profiles
            .lock()
            .insert(profile.display_name.to_lowercase(), profile);
        self
    }

    /// Serve `retweet` for `handle`.
    pub fn with_retweet(self, handle: &str, retweet: RetweetInfo) -> Self {
        self.retweets.lock().insert(handle.to_lowercase(), retweet);
        self
    }
}

#[async_trait]
impl SocialClient for MockSocialClient {
    async fn user_info(&self, handle: &str) -> Result<SocialProfile, CollaboratorError> {
        self.profiles
            .lock()
            .get(&handle.to_lowercase())
            .cloned()
            .ok_or_else(|| CollaboratorError::NotFound(format!("account {handle}")))
    }

    async fn retweet_search(
        &self,
        _requester_id: &str,
        handle: &str,
    ) -> Result<RetweetInfo, CollaboratorError> {
        self.retweets
            .lock()
            .get(&handle.to_lowercase())
            .cloned()
            .ok_or_else(|| CollaboratorError::NotFound(format!("retweet by {handle}")))
    }
}

// =============================================================================
// PAYMENTS
// =============================================================================

/// Payment gateway double. Issues `inv-<n>` receipts.
#[derive(Default)]
pub struct MockPaymentGateway {
    invoices: Mutex<Vec<InvoiceSpec>>,
    failure: Mutex<Option<CollaboratorError>>,
}

impl MockPaymentGateway {
    /// Accept every invoice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with `err`.
    pub fn failing(err: CollaboratorError) -> Self {
        Self {
            invoices: Mutex::new(Vec::new()),
            failure: Mutex::new(Some(err)),
        }
    }

    /// Every invoice received so far.
    pub fn invoices(&self) -> Vec<InvoiceSpec> {
        self.invoices.lock().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_payment(
        &self,
        invoice: InvoiceSpec,
    ) -> Result<PaymentReceipt, CollaboratorError> {
        if let Some(err) = self.failure.lock().clone() {
            return Err(err);
        }
        let mut invoices = self.invoices.lock();
        invoices.push(invoice);
        let n = invoices.len();
        Ok(PaymentReceipt {
            invoice_id: format!("inv-{n}"),
            payment_link: format!("https://pay.example/inv-{n}"),
        })
    }
}
