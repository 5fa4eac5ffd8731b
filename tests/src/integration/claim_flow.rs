//! Testnet reward claims through the running container.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rc_01_record_store::RecordStoreApi;
    use rc_03_claim_workflow::ClaimError;
    use shared_types::testing::peer;
    use shared_types::Amount;

    use crate::integration::fixtures::{restart_store, NodeBuilder};

    const CLAIMERS: &str = r#"{
        "t1": { "owner_id": "u1", "total_reward": 30 },
        "t2": { "owner_id": "u2", "total_reward": 2000000000, "claimed_tx_id": "tx0" }
    }"#;

    #[tokio::test]
    async fn test_claim_bonds_and_survives_restart() {
        let node = NodeBuilder::new()
            .claims(CLAIMERS)
            .peers(vec![peer(&["m1", "m2"], &["pk1", "pk2"])])
            .wallet_pac(501)
            .start()
            .await;
        node.wallet.push_bond_result(Ok("tx1".into()));
        let claims = node.container.claims();

        let tx = claims.claim("u1", "t1", "m1").await.unwrap();
        assert_eq!(tx, "tx1");

        let bonds = node.wallet.bonds();
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].public_key, "pk1");
        assert_eq!(bonds[0].validator_address, "m1");
        assert_eq!(bonds[0].amount, Amount::from_change(30));
        assert_eq!(bonds[0].memo, "TestNet reward claim from RoboPac");

        assert_eq!(
            claims.claim("u1", "t1", "m1").await,
            Err(ClaimError::AlreadyClaimed { tx_id: "tx1".into() })
        );
        assert_eq!(node.wallet.bonds().len(), 1);

        drop(claims);
        let (_dir, store) = restart_store(node).await;
        assert_eq!(store.lookup_claim("t1").unwrap().claimed_tx_id, "tx1");
        let summary = store.claim_status_summary();
        assert_eq!(summary.claimed, 2);
        assert_eq!(summary.total(), 2);
    }

    #[tokio::test]
    async fn test_rejections_leave_records_untouched() {
        let node = NodeBuilder::new()
            .claims(CLAIMERS)
            .peers(vec![peer(&["m1", "m2"], &["pk1", "pk2"])])
            .start()
            .await;
        let claims = node.container.claims();

        assert_eq!(
            claims.claim("u9", "t1", "m1").await,
            Err(ClaimError::InvalidClaimer)
        );
        assert_eq!(
            claims.claim("u1", "t9", "m1").await,
            Err(ClaimError::ClaimerNotFound)
        );
        assert_eq!(
            claims.claim("u1", "t1", "m2").await,
            Err(ClaimError::NotPrimaryAddress)
        );
        assert_eq!(
            claims.claim("u1", "t1", "m3").await,
            Err(ClaimError::PeerNotFound("m3".into()))
        );

        assert!(node.wallet.bonds().is_empty());
        assert!(!claims.claimer_info("t1").unwrap().is_claimed());

        drop(claims);
        let (_dir, store) = restart_store(node).await;
        assert_eq!(store.lookup_claim("t1").unwrap().claimed_tx_id, "");
    }

    #[tokio::test]
    async fn test_low_wallet_refuses_to_bond() {
        let node = NodeBuilder::new()
            .claims(CLAIMERS)
            .peers(vec![peer(&["m1"], &["pk1"])])
            .wallet_pac(499)
            .start()
            .await;

        assert_eq!(
            node.container.claims().claim("u1", "t1", "m1").await,
            Err(ClaimError::InsufficientBalance)
        );
        assert!(node.wallet.bonds().is_empty());
        node.container.shutdown().await;
    }

    #[tokio::test]
    async fn test_peer_joining_later_is_picked_up_on_refresh() {
        let node = NodeBuilder::new().claims(CLAIMERS).start().await;
        let claims = node.container.claims();

        assert_eq!(
            claims.claim("u1", "t1", "m1").await,
            Err(ClaimError::PeerNotFound("m1".into()))
        );

        node.network.set_peers(vec![peer(&["m1"], &["pk1"])]);
        let cache = node.container.snapshot_cache();
        let refresher = rc_02_validator_directory::SnapshotRefresher::new(
            node.network.clone(),
            cache,
            Duration::from_secs(60),
            Duration::from_secs(5),
        );
        assert_eq!(refresher.refresh_once().await.unwrap(), 1);

        assert!(claims.claim("u1", "t1", "m1").await.is_ok());
        node.container.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_bond_once() {
        let node = NodeBuilder::new()
            .claims(CLAIMERS)
            .peers(vec![peer(&["m1"], &["pk1"])])
            .start()
            .await;
        node.wallet.set_bond_delay(Duration::from_millis(50));

        let tasks: Vec<_> = (0..6)
            .map(|_| {
                let claims = node.container.claims();
                tokio::spawn(async move { claims.claim("u1", "t1", "m1").await })
            })
            .collect();

        let mut bonded = Vec::new();
        let mut rejected = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(tx) => bonded.push(tx),
                Err(ClaimError::AlreadyClaimed { .. }) => rejected += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(bonded.len(), 1);
        assert_eq!(rejected, 5);
        assert_eq!(node.wallet.bonds().len(), 1);

        let (_dir, store) = restart_store(node).await;
        assert_eq!(store.lookup_claim("t1").unwrap().claimed_tx_id, bonded[0]);
    }
}
