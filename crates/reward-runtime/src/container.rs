//! # Reward Container
//!
//! Central container holding the component instances with their lifetimes
//! and dependency injection.
//!
//! ```text
//!                 ┌──────────────── RewardContainer ────────────────┐
//!                 │                                                 │
//! Collaborators ──┼─→ ClaimService ──┐                              │
//!                 │                  ├─→ RecordStore (JSON files)   │
//!                 ├─→ BoosterService ┘                              │
//!                 │         │                                       │
//!                 │         └──────────→ SnapshotCache ←── SnapshotRefresher
//!                 └─────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use rc_01_record_store::{JsonFileDocuments, RecordStore, RecordStoreApi, StoreError};
use rc_02_validator_directory::{SnapshotCache, SnapshotRefresher};
use rc_03_claim_workflow::ClaimService;
use rc_04_booster_engine::{BoosterCollaborators, BoosterService};
use shared_types::{Clock, NetworkClient, PaymentGateway, SocialClient, WalletSigner};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::RuntimeConfig;

/// External clients the core consumes.
pub struct Collaborators {
    /// Blockchain RPC.
    pub network: Arc<dyn NetworkClient>,
    /// Service wallet.
    pub wallet: Arc<dyn WalletSigner>,
    /// Social-media API.
    pub social: Arc<dyn SocialClient>,
    /// Payment processor.
    pub payments: Arc<dyn PaymentGateway>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
}

/// Owns every component of a running reward core.
pub struct RewardContainer {
    store: Arc<RecordStore<JsonFileDocuments>>,
    cache: Arc<SnapshotCache>,
    claims: Arc<ClaimService>,
    boosters: Arc<BoosterService>,
    network: Arc<dyn NetworkClient>,
    config: RuntimeConfig,
    shutdown_tx: watch::Sender<bool>,
    refresher: Mutex<Option<JoinHandle<()>>>,
}

impl RewardContainer {
    /// Open the data directory and build the services.
    ///
    /// Fails if the directory is locked by another process or any table is
    /// missing or malformed.
    pub fn open(config: RuntimeConfig, remote: Collaborators) -> Result<Self, StoreError> {
        tracing::info!(
            "[runtime] Opening reward core at {}",
            config.store.data_dir.display()
        );

        let store = Arc::new(RecordStore::open(JsonFileDocuments::open(
            &config.store.data_dir,
        )?)?);
        let cache = Arc::new(SnapshotCache::new());

        let claims = Arc::new(ClaimService::new(
            store.clone(),
            cache.clone(),
            remote.network.clone(),
            remote.wallet.clone(),
            config.claim_config(),
        ));
        let boosters = Arc::new(BoosterService::new(
            store.clone(),
            cache.clone(),
            BoosterCollaborators {
                network: remote.network.clone(),
                wallet: remote.wallet,
                social: remote.social,
                payments: remote.payments,
                clock: remote.clock,
            },
            config.booster_config(),
        ));

        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            store,
            cache,
            claims,
            boosters,
            network: remote.network,
            config,
            shutdown_tx,
            refresher: Mutex::new(None),
        })
    }

    /// Take a first snapshot, then keep it fresh in the background.
    ///
    /// A failed first fetch is logged; resolutions fail with "peer not
    /// found" until a refresh succeeds.
    pub async fn start(&self) {
        let refresher = SnapshotRefresher::new(
            self.network.clone(),
            self.cache.clone(),
            self.config.refresh_interval(),
            self.config.call_timeout(),
        );

        match refresher.refresh_once().await {
            Ok(peers) => tracing::info!("[runtime] Initial snapshot: {} peers", peers),
            Err(err) => tracing::warn!("[runtime] ⚠️ Initial snapshot failed: {}", err),
        }
        if self.cache.is_bootstrap() {
            tracing::warn!(
                "[runtime] ⚠️ No network snapshot yet; resolutions fail until a refresh succeeds"
            );
        }

        let handle = refresher.spawn(self.shutdown_tx.subscribe());
        if let Some(previous) = self.refresher.lock().replace(handle) {
            previous.abort();
        }

        let claims = self.store.claim_status_summary();
        let boosters = self.store.booster_status_summary();
        tracing::info!(
            "[runtime] ✅ Ready: {} claimers ({} claimed), {}/{} booster parties",
            claims.total(),
            claims.claimed,
            boosters.total_parties,
            self.config.booster.program_cap
        );
    }

    /// Stop the refresher and wait for it to exit.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
        let handle = self.refresher.lock().take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                tracing::warn!("[runtime] Snapshot refresher ended abnormally: {}", err);
            }
        }
        tracing::info!("[runtime] Shut down");
    }

    /// Claim workflow.
    pub fn claims(&self) -> Arc<ClaimService> {
        self.claims.clone()
    }

    /// Booster workflow.
    pub fn boosters(&self) -> Arc<BoosterService> {
        self.boosters.clone()
    }

    /// Shared record store.
    pub fn store(&self) -> Arc<RecordStore<JsonFileDocuments>> {
        self.store.clone()
    }

    /// Shared snapshot cache.
    pub fn snapshot_cache(&self) -> Arc<SnapshotCache> {
        self.cache.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_02_validator_directory::SnapshotProvider;
    use shared_types::testing::{
        peer, MockNetworkClient, MockPaymentGateway, MockSocialClient, MockWallet,
    };
    use shared_types::{Amount, CollaboratorError, SystemClock};

    fn collaborators(network: Arc<MockNetworkClient>) -> Collaborators {
        Collaborators {
            network,
            wallet: Arc::new(MockWallet::with_balance(Amount::from_pac(1000))),
            social: Arc::new(MockSocialClient::new()),
            payments: Arc::new(MockPaymentGateway::new()),
            clock: Arc::new(SystemClock),
        }
    }

    fn config(dir: &std::path::Path) -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.store.data_dir = dir.to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_open_requires_initialized_tables() {
        let dir = tempfile::tempdir().unwrap();
        let result = RewardContainer::open(
            config(dir.path()),
            collaborators(Arc::new(MockNetworkClient::new())),
        );
        assert!(matches!(result, Err(StoreError::Load { .. })));
    }

    #[tokio::test]
    async fn test_start_loads_snapshot_and_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        JsonFileDocuments::initialize(dir.path()).unwrap();
        let network = Arc::new(MockNetworkClient::new().with_peers(vec![peer(&["pc1p"], &["pk"])]));

        let container = RewardContainer::open(config(dir.path()), collaborators(network)).unwrap();
        container.start().await;

        assert_eq!(container.snapshot_cache().resolve("pc1p").unwrap().public_key, "pk");
        assert_eq!(container.store().claim_status_summary().total(), 0);
        assert_eq!(container.boosters().booster_status().total_parties, 0);
        assert!(container.claims().claimer_info("t1").is_none());

        container.shutdown().await;
    }

    #[tokio::test]
    async fn test_start_survives_unreachable_network() {
        let dir = tempfile::tempdir().unwrap();
        JsonFileDocuments::initialize(dir.path()).unwrap();
        let network = Arc::new(MockNetworkClient::new().with_peers(vec![peer(&["pc1p"], &["pk"])]));
        network.set_network_failure(Some(CollaboratorError::Unavailable("rpc down".into())));

        let container = RewardContainer::open(config(dir.path()), collaborators(network)).unwrap();
        container.start().await;

        assert!(container.snapshot_cache().is_bootstrap());
        assert!(container.snapshot_cache().resolve("pc1p").is_err());
        container.shutdown().await;
    }

    #[tokio::test]
    async fn test_second_container_is_locked_out() {
        let dir = tempfile::tempdir().unwrap();
        JsonFileDocuments::initialize(dir.path()).unwrap();
        let network = Arc::new(MockNetworkClient::new());

        let _first = RewardContainer::open(config(dir.path()), collaborators(network.clone())).unwrap();
        assert!(matches!(
            RewardContainer::open(config(dir.path()), collaborators(network)),
            Err(StoreError::Locked(_))
        ));
    }
}
