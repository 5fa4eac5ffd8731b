//! Background snapshot refresh.

use std::sync::Arc;
use std::time::Duration;

use shared_types::{with_deadline, CollaboratorError, NetworkClient};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::cache::SnapshotCache;

/// Periodically re-fetches the peer snapshot into a [`SnapshotCache`].
pub struct SnapshotRefresher {
    client: Arc<dyn NetworkClient>,
    cache: Arc<SnapshotCache>,
    interval: Duration,
    call_timeout: Duration,
}

impl SnapshotRefresher {
    /// Create a refresher. Nothing runs until [`SnapshotRefresher::spawn`].
    pub fn new(
        client: Arc<dyn NetworkClient>,
        cache: Arc<SnapshotCache>,
        interval: Duration,
        call_timeout: Duration,
    ) -> Self {
        Self {
            client,
            cache,
            interval,
            call_timeout,
        }
    }

    /// Fetch once and swap the result in. Returns the peer count.
    ///
    /// On failure the cache keeps its previous snapshot.
    pub async fn refresh_once(&self) -> Result<usize, CollaboratorError> {
        let snapshot =
            with_deadline("network_info", self.call_timeout, self.client.network_info()).await?;
        let peers = snapshot.peers.len();
        self.cache.replace(snapshot);
        tracing::debug!("[rc-02] Snapshot refreshed ({} peers)", peers);
        Ok(peers)
    }

    /// Run the refresh loop until `shutdown` flips to `true` or its sender
    /// is dropped. The first refresh happens immediately.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::info!(
                "[rc-02] 🔄 Snapshot refresher started (every {}s)",
                self.interval.as_secs()
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(err) = self.refresh_once().await {
                            tracing::warn!("[rc-02] ⚠️ Snapshot refresh failed, keeping previous: {}", err);
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("[rc-02] Snapshot refresher stopped");
        })
    }
}
