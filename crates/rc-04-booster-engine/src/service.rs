//! # Booster Service
//!
//! Runs the booster pipelines against injected collaborators. Every
//! operation on a handle holds that handle's lock (case-folded) for its
//! whole duration. A booster bond that was sent but not committed is
//! latched by account id so the party is never bonded twice.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rc_01_record_store::RecordStoreApi;
use rc_02_validator_directory::{DirectoryError, SnapshotProvider};
use shared_types::{
    with_deadline, BoosterStatusSummary, Clock, IncentiveParty, InvoiceSpec, KeyedLocks,
    NetworkClient, PaymentGateway, SocialClient, WalletSigner, WhitelistEntry,
};
use uuid::Uuid;

use crate::config::BoosterConfig;
use crate::domain::{booster_price, check_account, check_retweet, pac_amount};
use crate::error::BoosterError;

/// Collaborators the booster engine talks to.
pub struct BoosterCollaborators {
    /// Blockchain RPC.
    pub network: Arc<dyn NetworkClient>,
    /// Service wallet.
    pub wallet: Arc<dyn WalletSigner>,
    /// Social-media API.
    pub social: Arc<dyn SocialClient>,
    /// Payment processor.
    pub payments: Arc<dyn PaymentGateway>,
    /// Time source for the age and recency gates.
    pub clock: Arc<dyn Clock>,
}

/// The booster workflow.
pub struct BoosterService {
    store: Arc<dyn RecordStoreApi>,
    directory: Arc<dyn SnapshotProvider>,
    remote: BoosterCollaborators,
    config: BoosterConfig,
    locks: KeyedLocks,
    /// account id → broadcast tx id whose commit failed.
    unrecorded: Mutex<HashMap<String, String>>,
}

impl BoosterService {
    /// Create a booster service.
    pub fn new(
        store: Arc<dyn RecordStoreApi>,
        directory: Arc<dyn SnapshotProvider>,
        remote: BoosterCollaborators,
        config: BoosterConfig,
    ) -> Self {
        Self {
            store,
            directory,
            remote,
            config,
            locks: KeyedLocks::new(),
            unrecorded: Mutex::new(HashMap::new()),
        }
    }

    /// Vet `handle`, price its package, open an invoice and record the
    /// party as awaiting payment.
    pub async fn booster_payment(
        &self,
        requester_id: &str,
        handle: &str,
        mainnet_addr: &str,
    ) -> Result<IncentiveParty, BoosterError> {
        let _guard = self.locks.acquire(&handle.to_lowercase()).await;
        let deadline = self.config.call_timeout;

        let total_parties = self.store.booster_status_summary().total_parties;
        if total_parties >= self.config.program_cap {
            tracing::info!("[rc-04] {} rejected: program is full ({})", handle, total_parties);
            return Err(BoosterError::ProgramFinished);
        }

        if self.store.lookup_incentive_party(handle).is_some() {
            return Err(BoosterError::DuplicateParty(handle.to_string()));
        }

        match with_deadline(
            "validator_info",
            deadline,
            self.remote.network.validator_info(mainnet_addr),
        )
        .await
        {
            Ok(_) => return Err(BoosterError::AlreadyStaked),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.into()),
        }

        let profile = with_deadline("user_info", deadline, self.remote.social.user_info(handle))
            .await
            .map_err(BoosterError::AccountNotFound)?;
        if self.store.party_by_account(&profile.account_id).is_some() {
            return Err(BoosterError::DuplicateParty(profile.account_id));
        }

        let now = self.remote.clock.now();
        let whitelisted = self.store.is_whitelisted(&profile.account_id);
        if let Err(err) = check_account(&profile, whitelisted, now, &self.config) {
            tracing::info!("[rc-04] @{} rejected: {}", profile.display_name, err);
            return Err(err);
        }

        let retweet = with_deadline(
            "retweet_search",
            deadline,
            self.remote.social.retweet_search(requester_id, handle),
        )
        .await
        .map_err(BoosterError::RetweetNotFound)?;
        check_retweet(&retweet, now, &self.config)?;

        let pac = pac_amount(profile.followers, &self.config);
        let usd_price = booster_price(total_parties);

        let invoice = InvoiceSpec {
            order_id: Uuid::new_v4().to_string(),
            price_usd: usd_price,
            description: format!("{pac} PAC validator booster for @{}", profile.display_name),
        };
        let receipt = with_deadline(
            "create_payment",
            deadline,
            self.remote.payments.create_payment(invoice),
        )
        .await
        .map_err(BoosterError::PaymentFailed)?;

        let party = IncentiveParty {
            account_id: profile.account_id,
            display_name: profile.display_name,
            owner_id: requester_id.to_string(),
            validator_address: mainnet_addr.to_string(),
            pac_amount: pac,
            usd_price,
            payment_settled: false,
            bond_tx_id: String::new(),
            invoice_id: receipt.invoice_id,
            payment_link: receipt.payment_link,
            created_at: now,
        };

        if let Err(err) = self
            .store
            .insert_incentive_party(party.clone(), self.config.program_cap)
        {
            tracing::warn!(
                "[rc-04] ⚠️ Invoice {} for @{} issued but party not recorded: {}",
                party.invoice_id,
                party.display_name,
                err
            );
            return Err(err.into());
        }

        tracing::info!(
            "[rc-04] ✅ @{} approved for {} PAC at ${} (invoice {})",
            party.display_name,
            party.pac_amount,
            party.usd_price,
            party.invoice_id
        );
        Ok(party)
    }

    /// Whitelist `handle` so it skips the age and follower gates.
    pub async fn booster_whitelist(
        &self,
        handle: &str,
        authorizer: &str,
    ) -> Result<WhitelistEntry, BoosterError> {
        let _guard = self.locks.acquire(&handle.to_lowercase()).await;

        let profile = with_deadline(
            "user_info",
            self.config.call_timeout,
            self.remote.social.user_info(handle),
        )
        .await
        .map_err(BoosterError::AccountNotFound)?;

        Ok(self
            .store
            .whitelist(&profile.account_id, &profile.display_name, authorizer)?)
    }

    /// Bond the paid package of `handle`. Returns the bond transaction id.
    pub async fn booster_claim(&self, handle: &str) -> Result<String, BoosterError> {
        let _guard = self.locks.acquire(&handle.to_lowercase()).await;
        let deadline = self.config.call_timeout;

        let party = self
            .store
            .lookup_incentive_party(handle)
            .ok_or_else(|| BoosterError::PartyNotFound(handle.to_string()))?;
        self.reconcile(&party.account_id)?;
        if !party.payment_settled {
            return Err(BoosterError::PaymentNotSettled(party.display_name));
        }
        if party.is_bonded() {
            return Err(BoosterError::AlreadyClaimed {
                tx_id: party.bond_tx_id,
            });
        }

        let resolution = self
            .directory
            .resolve(&party.validator_address)
            .map_err(|err| match err {
                DirectoryError::NotFound(addr) => BoosterError::PeerNotFound(addr),
                DirectoryError::KeyMissing { address, .. } => BoosterError::KeyMissing(address),
            })?;
        if !resolution.is_primary() {
            return Err(BoosterError::NotPrimaryAddress);
        }

        let balance = with_deadline("wallet_balance", deadline, self.remote.wallet.balance()).await?;
        if balance < self.config.min_wallet_reserve {
            tracing::warn!(
                "[rc-04] ⚠️ Wallet balance {} below reserve {}",
                balance,
                self.config.min_wallet_reserve
            );
            return Err(BoosterError::InsufficientBalance);
        }

        let tx_id = match with_deadline(
            "bond_transaction",
            deadline,
            self.remote.wallet.bond_transaction(
                &resolution.public_key,
                &party.validator_address,
                &self.config.memo,
                party.stake(),
            ),
        )
        .await
        {
            Ok(tx_id) if tx_id.is_empty() => return Err(BoosterError::TransactionSendFailed),
            Ok(tx_id) => tx_id,
            Err(err) => {
                if err.is_timeout() {
                    tracing::error!(
                        "[rc-04] ❌ Booster bond for {} timed out; check the chain before retrying",
                        party.account_id
                    );
                }
                return Err(err.into());
            }
        };

        if let Err(err) = self.store.commit_party_bond(&party.account_id, &tx_id) {
            tracing::error!(
                "[rc-04] ❌ UNRECOVERABLE: booster bond {} for @{} ({}, {} PAC to {}) sent but not recorded: {}",
                tx_id,
                party.display_name,
                party.account_id,
                party.pac_amount,
                party.validator_address,
                err
            );
            self.unrecorded
                .lock()
                .insert(party.account_id.clone(), tx_id.clone());
            return Err(BoosterError::Unrecoverable {
                account_id: party.account_id,
                tx_id,
                reason: err.to_string(),
            });
        }

        tracing::info!(
            "[rc-04] ✅ @{} bonded {} PAC to {} in {}",
            party.display_name,
            party.pac_amount,
            party.validator_address,
            tx_id
        );
        Ok(tx_id)
    }

    /// Retry the commit of a latched bond. Must run under the handle lock.
    fn reconcile(&self, account_id: &str) -> Result<(), BoosterError> {
        let Some(tx_id) = self.unrecorded.lock().get(account_id).cloned() else {
            return Ok(());
        };

        if let Err(err) = self.store.commit_party_bond(account_id, &tx_id) {
            tracing::error!(
                "[rc-04] ❌ UNRECOVERABLE: booster bond {} for {} still not recorded: {}",
                tx_id,
                account_id,
                err
            );
            return Err(BoosterError::Unrecoverable {
                account_id: account_id.to_string(),
                tx_id,
                reason: err.to_string(),
            });
        }

        self.unrecorded.lock().remove(account_id);
        tracing::info!("[rc-04] 🔄 Recorded pending booster bond {} for {}", tx_id, account_id);
        Err(BoosterError::AlreadyClaimed { tx_id })
    }

    /// Program totals.
    pub fn booster_status(&self) -> BoosterStatusSummary {
        self.store.booster_status_summary()
    }
}
