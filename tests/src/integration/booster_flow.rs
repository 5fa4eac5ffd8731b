//! Booster program: approval, payment, whitelisting and bonding.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Months};
    use rc_01_record_store::RecordStoreApi;
    use rc_04_booster_engine::BoosterError;
    use shared_types::testing::{peer, MockSocialClient};
    use shared_types::{Amount, RetweetInfo, SocialProfile};

    use crate::integration::fixtures::{now, restart_store, NodeBuilder};

    fn account(id: &str, name: &str, years_old: u32, followers: u64) -> SocialProfile {
        SocialProfile {
            account_id: id.into(),
            display_name: name.into(),
            created_at: now() - Months::new(years_old * 12),
            followers,
            verified: false,
        }
    }

    fn shared(days_ago: i64) -> RetweetInfo {
        RetweetInfo {
            tweet_id: "share".into(),
            created_at: now() - Duration::days(days_ago),
        }
    }

    #[tokio::test]
    async fn test_paid_party_bonds_and_survives_restart() {
        let social = MockSocialClient::new()
            .with_profile(account("42", "Alice", 5, 1200))
            .with_retweet("alice", shared(1));
        let node = NodeBuilder::new()
            .peers(vec![peer(&["pc1pval"], &["pkval"])])
            .social(social)
            .start()
            .await;
        let boosters = node.container.boosters();

        let party = boosters
            .booster_payment("chat-1", "alice", "pc1pval")
            .await
            .unwrap();
        assert_eq!(party.account_id, "42");
        assert_eq!(party.pac_amount, 200);
        assert_eq!(party.invoice_id, "inv-1");
        assert_eq!(node.payments.invoices().len(), 1);

        assert_eq!(
            boosters.booster_claim("alice").await,
            Err(BoosterError::PaymentNotSettled("Alice".into()))
        );

        node.container.store().mark_payment_settled("42").unwrap();
        let tx = boosters.booster_claim("ALICE").await.unwrap();

        let bonds = node.wallet.bonds();
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].public_key, "pkval");
        assert_eq!(bonds[0].amount, Amount::from_pac(200));
        assert_eq!(bonds[0].memo, "Validator Booster Program");

        let status = boosters.booster_status();
        assert_eq!(status.total_parties, 1);
        assert_eq!(status.bonded, 1);
        assert_eq!(status.payments_settled, 1);

        drop(boosters);
        let (_dir, store) = restart_store(node).await;
        let stored = store.party_by_account("42").unwrap();
        assert_eq!(stored.bond_tx_id, tx);
        assert!(stored.payment_settled);
    }

    #[tokio::test]
    async fn test_whitelist_admits_young_account() {
        let social = MockSocialClient::new()
            .with_profile(account("7", "newbie", 1, 50))
            .with_retweet("newbie", shared(2));
        let node = NodeBuilder::new().social(social).start().await;
        let boosters = node.container.boosters();

        assert_eq!(
            boosters.booster_payment("chat-7", "newbie", "pc1pnew").await,
            Err(BoosterError::AccountTooNew { min_years: 2 })
        );
        assert!(node.payments.invoices().is_empty());

        let entry = boosters.booster_whitelist("Newbie", "admin-1").await.unwrap();
        assert_eq!(entry.account_id, "7");
        assert_eq!(entry.authorized_by, "admin-1");

        let party = boosters
            .booster_payment("chat-7", "newbie", "pc1pnew")
            .await
            .unwrap();
        assert_eq!(party.pac_amount, 150);

        drop(boosters);
        let (_dir, store) = restart_store(node).await;
        assert!(store.is_whitelisted("7"));
        assert_eq!(store.booster_status_summary().whitelisted, 1);
    }

    #[tokio::test]
    async fn test_program_stops_at_configured_cap() {
        let mut social = MockSocialClient::new();
        for i in 0..3 {
            let name = format!("member{i}");
            social = social
                .with_profile(account(&format!("id{i}"), &name, 3, 400))
                .with_retweet(&name, shared(1));
        }
        let node = NodeBuilder::new().social(social).program_cap(2).start().await;
        let boosters = node.container.boosters();

        for i in 0..2 {
            boosters
                .booster_payment("chat", &format!("member{i}"), &format!("pc1p{i}"))
                .await
                .unwrap();
        }
        assert_eq!(
            boosters.booster_payment("chat", "member2", "pc1p2").await,
            Err(BoosterError::ProgramFinished)
        );
        assert_eq!(boosters.booster_status().total_parties, 2);
        assert_eq!(node.payments.invoices().len(), 2);

        node.container.shutdown().await;
    }
}
