//! Shared setup: a temporary data directory and scripted collaborators
//! wired through the runtime container.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rc_01_record_store::{JsonFileDocuments, RecordStore};
use reward_runtime::{Collaborators, RewardContainer, RuntimeConfig};
use shared_types::testing::{MockNetworkClient, MockPaymentGateway, MockSocialClient, MockWallet};
use shared_types::{Amount, FixedClock, PeerInfo};
use tempfile::TempDir;

/// Fixed "now" for the age and recency gates.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// A running container plus handles on its doubles.
pub struct Node {
    pub dir: TempDir,
    pub container: RewardContainer,
    pub network: Arc<MockNetworkClient>,
    pub wallet: Arc<MockWallet>,
    pub payments: Arc<MockPaymentGateway>,
}

/// Builder for [`Node`].
pub struct NodeBuilder {
    claims_json: Option<String>,
    peers: Vec<PeerInfo>,
    wallet_pac: i64,
    social: MockSocialClient,
    program_cap: Option<usize>,
}

impl Default for NodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self {
            claims_json: None,
            peers: Vec::new(),
            wallet_pac: 10_000,
            social: MockSocialClient::new(),
            program_cap: None,
        }
    }

    pub fn claims(mut self, json: &str) -> Self {
        self.claims_json = Some(json.to_string());
        self
    }

    pub fn peers(mut self, peers: Vec<PeerInfo>) -> Self {
        self.peers = peers;
        self
    }

    pub fn wallet_pac(mut self, pac: i64) -> Self {
        self.wallet_pac = pac;
        self
    }

    pub fn social(mut self, social: MockSocialClient) -> Self {
        self.social = social;
        self
    }

    pub fn program_cap(mut self, cap: usize) -> Self {
        self.program_cap = Some(cap);
        self
    }

    pub async fn start(self) -> Node {
        let dir = tempfile::tempdir().unwrap();
        JsonFileDocuments::initialize(dir.path()).unwrap();
        if let Some(json) = &self.claims_json {
            std::fs::write(dir.path().join("claimers.json"), json).unwrap();
        }

        let mut config = RuntimeConfig::default();
        config.store.data_dir = dir.path().to_path_buf();
        config.network.call_timeout_secs = 5;
        if let Some(cap) = self.program_cap {
            config.booster.program_cap = cap;
        }

        let network = Arc::new(MockNetworkClient::new().with_peers(self.peers));
        let wallet = Arc::new(MockWallet::with_balance(Amount::from_pac(self.wallet_pac)));
        let payments = Arc::new(MockPaymentGateway::new());

        let container = RewardContainer::open(
            config,
            Collaborators {
                network: network.clone(),
                wallet: wallet.clone(),
                social: Arc::new(self.social),
                payments: payments.clone(),
                clock: Arc::new(FixedClock(now())),
            },
        )
        .unwrap();
        container.start().await;

        Node {
            dir,
            container,
            network,
            wallet,
            payments,
        }
    }
}

/// Stop the node and reopen its directory as a bare store.
pub async fn restart_store(node: Node) -> (TempDir, RecordStore<JsonFileDocuments>) {
    node.container.shutdown().await;
    let Node { dir, container, .. } = node;
    drop(container);
    let store = reopen(dir.path());
    (dir, store)
}

/// Open a store over an existing directory.
pub fn reopen(dir: &Path) -> RecordStore<JsonFileDocuments> {
    RecordStore::open(JsonFileDocuments::open(dir).unwrap()).unwrap()
}
