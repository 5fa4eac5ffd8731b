//! # Claim Service
//!
//! Runs the claim pipeline against injected collaborators.
//!
//! A bond that was broadcast but could not be committed is latched in
//! memory. While latched, the address never bonds again; each later request
//! retries the commit instead.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rc_01_record_store::RecordStoreApi;
use rc_02_validator_directory::{DirectoryError, SnapshotProvider};
use shared_types::{
    with_deadline, ClaimRecord, ClaimStatusSummary, KeyedLocks, NetworkClient, WalletSigner,
};

use crate::config::ClaimConfig;
use crate::error::ClaimError;

/// The claim workflow.
pub struct ClaimService {
    store: Arc<dyn RecordStoreApi>,
    directory: Arc<dyn SnapshotProvider>,
    network: Arc<dyn NetworkClient>,
    wallet: Arc<dyn WalletSigner>,
    config: ClaimConfig,
    locks: KeyedLocks,
    /// testnet address → broadcast tx id whose commit failed.
    unrecorded: Mutex<HashMap<String, String>>,
}

impl ClaimService {
    /// Create a claim service.
    pub fn new(
        store: Arc<dyn RecordStoreApi>,
        directory: Arc<dyn SnapshotProvider>,
        network: Arc<dyn NetworkClient>,
        wallet: Arc<dyn WalletSigner>,
        config: ClaimConfig,
    ) -> Self {
        Self {
            store,
            directory,
            network,
            wallet,
            config,
            locks: KeyedLocks::new(),
            unrecorded: Mutex::new(HashMap::new()),
        }
    }

    /// Bond the reward allocated to `testnet_addr` to `mainnet_addr`.
    ///
    /// Returns the bond transaction id.
    pub async fn claim(
        &self,
        requester_id: &str,
        testnet_addr: &str,
        mainnet_addr: &str,
    ) -> Result<String, ClaimError> {
        let deadline = self.config.call_timeout;

        match with_deadline(
            "validator_info",
            deadline,
            self.network.validator_info(mainnet_addr),
        )
        .await
        {
            Ok(info) if !info.stake.is_zero() => {
                tracing::info!("[rc-03] {} rejected: {} already staked", testnet_addr, mainnet_addr);
                return Err(ClaimError::AlreadyStaked);
            }
            Ok(_) => {}
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.into()),
        }

        let balance = with_deadline("wallet_balance", deadline, self.wallet.balance()).await?;
        if balance < self.config.min_wallet_reserve {
            tracing::warn!(
                "[rc-03] ⚠️ Wallet balance {} below reserve {}",
                balance,
                self.config.min_wallet_reserve
            );
            return Err(ClaimError::InsufficientBalance);
        }

        let _guard = self.locks.acquire(testnet_addr).await;
        self.reconcile(testnet_addr)?;

        let record = self
            .store
            .lookup_claim(testnet_addr)
            .ok_or(ClaimError::ClaimerNotFound)?;
        if record.owner_id != requester_id {
            tracing::info!(
                "[rc-03] {} rejected: requester {} is not the owner",
                testnet_addr,
                requester_id
            );
            return Err(ClaimError::InvalidClaimer);
        }
        if record.is_claimed() {
            return Err(ClaimError::AlreadyClaimed {
                tx_id: record.claimed_tx_id,
            });
        }

        let resolution = self.directory.resolve(mainnet_addr).map_err(|err| match err {
            DirectoryError::NotFound(addr) => ClaimError::PeerNotFound(addr),
            DirectoryError::KeyMissing { address, .. } => ClaimError::KeyMissing(address),
        })?;
        if !resolution.is_primary() {
            return Err(ClaimError::NotPrimaryAddress);
        }

        let tx_id = match with_deadline(
            "bond_transaction",
            deadline,
            self.wallet.bond_transaction(
                &resolution.public_key,
                mainnet_addr,
                &self.config.memo,
                record.total_reward,
            ),
        )
        .await
        {
            Ok(tx_id) if tx_id.is_empty() => return Err(ClaimError::TransactionSendFailed),
            Ok(tx_id) => tx_id,
            Err(err) => {
                if err.is_timeout() {
                    tracing::error!(
                        "[rc-03] ❌ Bond for {} to {} timed out; check the chain before retrying",
                        testnet_addr,
                        mainnet_addr
                    );
                }
                return Err(err.into());
            }
        };

        if let Err(err) = self.store.commit_claim_transaction(testnet_addr, &tx_id) {
            tracing::error!(
                "[rc-03] ❌ UNRECOVERABLE: bond {} for {} (owner {}, {}) sent but not recorded: {}",
                tx_id,
                testnet_addr,
                requester_id,
                record.total_reward,
                err
            );
            self.unrecorded
                .lock()
                .insert(testnet_addr.to_string(), tx_id.clone());
            return Err(ClaimError::Unrecoverable {
                testnet_addr: testnet_addr.to_string(),
                tx_id,
                reason: err.to_string(),
            });
        }

        tracing::info!(
            "[rc-03] ✅ {} claimed {} to {} in {}",
            testnet_addr,
            record.total_reward,
            mainnet_addr,
            tx_id
        );
        Ok(tx_id)
    }

    /// Retry the commit of a latched bond. Must run under the address lock.
    fn reconcile(&self, testnet_addr: &str) -> Result<(), ClaimError> {
        let Some(tx_id) = self.unrecorded.lock().get(testnet_addr).cloned() else {
            return Ok(());
        };

        if let Err(err) = self.store.commit_claim_transaction(testnet_addr, &tx_id) {
            tracing::error!(
                "[rc-03] ❌ UNRECOVERABLE: bond {} for {} still not recorded: {}",
                tx_id,
                testnet_addr,
                err
            );
            return Err(ClaimError::Unrecoverable {
                testnet_addr: testnet_addr.to_string(),
                tx_id,
                reason: err.to_string(),
            });
        }

        self.unrecorded.lock().remove(testnet_addr);
        tracing::info!("[rc-03] 🔄 Recorded pending bond {} for {}", tx_id, testnet_addr);
        Err(ClaimError::AlreadyClaimed { tx_id })
    }

    /// Allocation for a testnet address.
    pub fn claimer_info(&self, testnet_addr: &str) -> Option<ClaimRecord> {
        self.store.lookup_claim(testnet_addr)
    }

    /// Claimed vs. unclaimed totals.
    pub fn claim_status(&self) -> ClaimStatusSummary {
        self.store.claim_status_summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use rc_01_record_store::{InMemoryDocuments, RecordStore, Table};
    use rc_02_validator_directory::SnapshotCache;
    use shared_types::testing::{peer, MockNetworkClient, MockWallet};
    use shared_types::{Amount, CollaboratorError, NetworkSnapshot};

    const CLAIMS: &str = r#"{
        "t1": { "owner_id": "u1", "total_reward": 30, "claimed_tx_id": "" },
        "t2": { "owner_id": "u2", "total_reward": 40, "claimed_tx_id": "tx-old" }
    }"#;

    struct Harness {
        store: Arc<RecordStore<InMemoryDocuments>>,
        network: Arc<MockNetworkClient>,
        wallet: Arc<MockWallet>,
        service: Arc<ClaimService>,
    }

    fn harness_with(network: MockNetworkClient, balance_pac: i64) -> Harness {
        let docs = InMemoryDocuments::new().with_document(Table::Claims, CLAIMS);
        let store = Arc::new(RecordStore::open(docs).unwrap());
        let cache = Arc::new(SnapshotCache::with_snapshot(NetworkSnapshot::new(
            "testnet",
            vec![peer(&["m1", "m2"], &["pk", "pk2"])],
        )));
        let network = Arc::new(network);
        let wallet = Arc::new(MockWallet::with_balance(Amount::from_pac(balance_pac)));

        let service = Arc::new(ClaimService::new(
            store.clone(),
            cache,
            network.clone(),
            wallet.clone(),
            ClaimConfig::for_testing(),
        ));
        Harness {
            store,
            network,
            wallet,
            service,
        }
    }

    fn harness() -> Harness {
        harness_with(MockNetworkClient::new(), 501)
    }

    #[tokio::test]
    async fn test_claim_bonds_and_records() {
        let h = harness();
        h.wallet.push_bond_result(Ok("tx1".into()));

        let tx = h.service.claim("u1", "t1", "m1").await.unwrap();

        assert_eq!(tx, "tx1");
        assert_eq!(h.store.lookup_claim("t1").unwrap().claimed_tx_id, "tx1");

        let bonds = h.wallet.bonds();
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].public_key, "pk");
        assert_eq!(bonds[0].validator_address, "m1");
        assert_eq!(bonds[0].memo, "TestNet reward claim from RoboPac");
        assert_eq!(bonds[0].amount, Amount::from_change(30));

        assert_eq!(
            h.service.claim("u1", "t1", "m1").await,
            Err(ClaimError::AlreadyClaimed { tx_id: "tx1".into() })
        );
        assert_eq!(h.wallet.bonds().len(), 1);
    }

    #[tokio::test]
    async fn test_staked_validator_rejected() {
        let h = harness_with(
            MockNetworkClient::new().with_validator("m1", Amount::from_pac(1)),
            501,
        );
        assert_eq!(
            h.service.claim("u1", "t1", "m1").await,
            Err(ClaimError::AlreadyStaked)
        );
        assert_eq!(h.network.validator_calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_stake_validator_passes_first_check() {
        let h = harness_with(MockNetworkClient::new().with_validator("m1", Amount::ZERO), 501);
        assert!(h.service.claim("u1", "t1", "m1").await.is_ok());
    }

    #[tokio::test]
    async fn test_low_wallet_balance_rejected() {
        let h = harness_with(MockNetworkClient::new(), 499);
        assert_eq!(
            h.service.claim("u1", "t1", "m1").await,
            Err(ClaimError::InsufficientBalance)
        );
    }

    #[tokio::test]
    async fn test_reserve_is_inclusive() {
        let h = harness_with(MockNetworkClient::new(), 500);
        assert!(h.service.claim("u1", "t1", "m1").await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_and_foreign_claimers_rejected() {
        let h = harness();
        assert_eq!(
            h.service.claim("u1", "t9", "m1").await,
            Err(ClaimError::ClaimerNotFound)
        );
        assert_eq!(
            h.service.claim("u9", "t1", "m1").await,
            Err(ClaimError::InvalidClaimer)
        );
        assert_eq!(
            h.service.claim("u2", "t2", "m1").await,
            Err(ClaimError::AlreadyClaimed { tx_id: "tx-old".into() })
        );
        assert!(h.wallet.bonds().is_empty());
    }

    #[tokio::test]
    async fn test_address_resolution_rules() {
        let h = harness();
        assert_eq!(
            h.service.claim("u1", "t1", "m2").await,
            Err(ClaimError::NotPrimaryAddress)
        );
        assert_eq!(
            h.service.claim("u1", "t1", "nowhere").await,
            Err(ClaimError::PeerNotFound("nowhere".into()))
        );
        assert!(h.wallet.bonds().is_empty());
    }

    #[tokio::test]
    async fn test_empty_tx_id_is_send_failure() {
        let h = harness();
        h.wallet.push_bond_result(Ok(String::new()));

        assert_eq!(
            h.service.claim("u1", "t1", "m1").await,
            Err(ClaimError::TransactionSendFailed)
        );
        assert!(!h.store.lookup_claim("t1").unwrap().is_claimed());
    }

    #[tokio::test]
    async fn test_signer_error_propagates() {
        let h = harness();
        h.wallet
            .push_bond_result(Err(CollaboratorError::Rejected("nonce".into())));

        let err = h.service.claim("u1", "t1", "m1").await.unwrap_err();
        assert_eq!(err, ClaimError::Collaborator(CollaboratorError::Rejected("nonce".into())));
        assert!(!err.is_user_facing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bond_timeout_surfaces_as_timeout() {
        let h = harness();
        h.wallet.set_bond_delay(Duration::from_secs(60));

        let err = h.service.claim("u1", "t1", "m1").await.unwrap_err();
        assert!(matches!(
            err,
            ClaimError::Collaborator(CollaboratorError::Timeout { operation: "bond_transaction", .. })
        ));
        assert!(!h.store.lookup_claim("t1").unwrap().is_claimed());
    }

    #[tokio::test]
    async fn test_commit_failure_is_unrecoverable() {
        let h = harness();
        h.wallet.push_bond_result(Ok("tx1".into()));
        h.store.storage().fail_saves(true);

        let err = h.service.claim("u1", "t1", "m1").await.unwrap_err();

        assert!(err.is_unrecoverable());
        assert!(matches!(err, ClaimError::Unrecoverable { ref tx_id, .. } if tx_id == "tx1"));
        assert_eq!(h.wallet.bonds().len(), 1);
    }

    #[tokio::test]
    async fn test_retry_after_unrecorded_bond_never_bonds_again() {
        let h = harness();
        h.wallet.push_bond_result(Ok("tx1".into()));
        h.store.storage().fail_saves(true);

        let first = h.service.claim("u1", "t1", "m1").await.unwrap_err();
        assert!(first.is_unrecoverable());

        let second = h.service.claim("u1", "t1", "m1").await.unwrap_err();
        assert!(matches!(second, ClaimError::Unrecoverable { ref tx_id, .. } if tx_id == "tx1"));
        assert_eq!(h.wallet.bonds().len(), 1);
        assert!(!h.store.lookup_claim("t1").unwrap().is_claimed());

        // Once the store accepts writes the pending bond is recorded.
        h.store.storage().fail_saves(false);
        assert_eq!(
            h.service.claim("u1", "t1", "m1").await,
            Err(ClaimError::AlreadyClaimed { tx_id: "tx1".into() })
        );
        assert_eq!(h.store.lookup_claim("t1").unwrap().claimed_tx_id, "tx1");
        assert_eq!(h.wallet.bonds().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_bond_once() {
        let h = harness();
        h.wallet.set_bond_delay(Duration::from_millis(50));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let service = h.service.clone();
                tokio::spawn(async move { service.claim("u1", "t1", "m1").await })
            })
            .collect();

        let mut ok = 0;
        let mut already = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => ok += 1,
                Err(ClaimError::AlreadyClaimed { .. }) => already += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(already, 7);
        assert_eq!(h.wallet.bonds().len(), 1);
    }

    #[tokio::test]
    async fn test_info_and_status_pass_through() {
        let h = harness();
        assert_eq!(h.service.claimer_info("t2").unwrap().owner_id, "u2");
        assert!(h.service.claimer_info("t9").is_none());

        let status = h.service.claim_status();
        assert_eq!(status.claimed, 1);
        assert_eq!(status.unclaimed, 1);
        assert_eq!(status.unclaimed_amount, Amount::from_change(30));
    }
}
