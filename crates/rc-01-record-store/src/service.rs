//! # Record Store Service
//!
//! Implements `RecordStoreApi` over any `DocumentStorage`.
//!
//! Each table is a `BTreeMap` behind its own `parking_lot::RwLock`. A
//! mutator holds the table's write lock from validation through the durable
//! write, so writers to one table are serialized and a reader never sees a
//! change that is not yet on disk. When the write fails the table is put
//! back exactly as it was.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use shared_types::{
    BoosterStatusSummary, ClaimRecord, ClaimStatusSummary, IncentiveParty, WhitelistEntry,
};

use crate::domain::{StoreError, Table};
use crate::ports::{DocumentStorage, RecordStoreApi};

type Claims = BTreeMap<String, ClaimRecord>;
type Parties = BTreeMap<String, IncentiveParty>;
type Whitelist = BTreeMap<String, WhitelistEntry>;

/// The record store.
pub struct RecordStore<S: DocumentStorage> {
    storage: S,
    claims: RwLock<Claims>,
    parties: RwLock<Parties>,
    whitelist: RwLock<Whitelist>,
}

impl<S: DocumentStorage> RecordStore<S> {
    /// Load every table from `storage`.
    ///
    /// # Errors
    /// `Load` when any table is missing, empty or malformed. Nothing is
    /// served from a partially loaded store.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        let claims: Claims = load_table(&storage, Table::Claims)?;
        let parties: Parties = load_table(&storage, Table::Parties)?;
        let whitelist: Whitelist = load_table(&storage, Table::Whitelist)?;

        tracing::info!(
            "[rc-01] 💾 Loaded {} claimers, {} booster parties, {} whitelisted accounts",
            claims.len(),
            parties.len(),
            whitelist.len()
        );

        Ok(Self {
            storage,
            claims: RwLock::new(claims),
            parties: RwLock::new(parties),
            whitelist: RwLock::new(whitelist),
        })
    }

    /// Underlying document storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply `change` to a table and write it through.
    ///
    /// `change` must validate before touching the map; if it returns an
    /// error nothing is written. A failed write restores the prior table.
    fn mutate<T, R>(
        &self,
        table: Table,
        lock: &RwLock<BTreeMap<String, T>>,
        change: impl FnOnce(&mut BTreeMap<String, T>) -> Result<R, StoreError>,
    ) -> Result<R, StoreError>
    where
        T: Clone + Serialize,
    {
        let mut guard = lock.write();
        let before = guard.clone();
        let out = change(&mut *guard)?;

        if let Err(err) = self.persist(table, &*guard) {
            *guard = before;
            tracing::error!("[rc-01] ❌ {}; in-memory {} rolled back", err, table);
            return Err(err);
        }
        Ok(out)
    }

    fn persist<T: Serialize>(&self, table: Table, rows: &BTreeMap<String, T>) -> Result<(), StoreError> {
        let document = serde_json::to_vec_pretty(rows).map_err(|e| StoreError::Persist {
            table,
            reason: e.to_string(),
        })?;
        self.storage.save(table, &document)?;
        tracing::debug!("[rc-01] Persisted {} ({} rows)", table, rows.len());
        Ok(())
    }
}

fn load_table<S, T>(storage: &S, table: Table) -> Result<BTreeMap<String, T>, StoreError>
where
    S: DocumentStorage,
    T: DeserializeOwned,
{
    let bytes = storage.load(table)?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Load {
        table,
        reason: e.to_string(),
    })
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Write-once check shared by claims and bonds.
fn check_write_once(key: &str, current: &str, tx_id: &str) -> Result<bool, StoreError> {
    if tx_id.is_empty() {
        return Err(StoreError::EmptyTxId);
    }
    if current.is_empty() {
        return Ok(true);
    }
    if current == tx_id {
        return Ok(false);
    }
    Err(StoreError::AlreadyClaimed {
        key: key.to_string(),
        tx_id: current.to_string(),
    })
}

impl<S: DocumentStorage> RecordStoreApi for RecordStore<S> {
    fn lookup_claim(&self, testnet_addr: &str) -> Option<ClaimRecord> {
        self.claims.read().get(testnet_addr).cloned()
    }

    fn commit_claim_transaction(&self, testnet_addr: &str, tx_id: &str) -> Result<(), StoreError> {
        // Idempotent repeats skip the write entirely.
        {
            let claims = self.claims.read();
            let record = claims
                .get(testnet_addr)
                .ok_or_else(|| StoreError::ClaimNotFound(testnet_addr.to_string()))?;
            if !check_write_once(testnet_addr, &record.claimed_tx_id, tx_id)? {
                return Ok(());
            }
        }

        self.mutate(Table::Claims, &self.claims, |claims| {
            let record = claims
                .get_mut(testnet_addr)
                .ok_or_else(|| StoreError::ClaimNotFound(testnet_addr.to_string()))?;
            if check_write_once(testnet_addr, &record.claimed_tx_id, tx_id)? {
                record.claimed_tx_id = tx_id.to_string();
            }
            Ok(())
        })?;

        tracing::info!("[rc-01] ✅ Claim for {} recorded as {}", testnet_addr, tx_id);
        Ok(())
    }

    fn claim_status_summary(&self) -> ClaimStatusSummary {
        let mut summary = ClaimStatusSummary::default();
        for record in self.claims.read().values() {
            summary.record(record);
        }
        summary
    }

    fn lookup_incentive_party(&self, display_name: &str) -> Option<IncentiveParty> {
        self.parties
            .read()
            .values()
            .find(|p| same_name(&p.display_name, display_name))
            .cloned()
    }

    fn party_by_account(&self, account_id: &str) -> Option<IncentiveParty> {
        self.parties.read().get(account_id).cloned()
    }

    fn save_incentive_party(&self, party: IncentiveParty) -> Result<(), StoreError> {
        self.mutate(Table::Parties, &self.parties, |parties| {
            if parties.values().any(|p| {
                p.account_id != party.account_id && same_name(&p.display_name, &party.display_name)
            }) {
                return Err(StoreError::DuplicateParty(party.display_name.clone()));
            }
            parties.insert(party.account_id.clone(), party);
            Ok(())
        })
    }

    fn insert_incentive_party(&self, party: IncentiveParty, cap: usize) -> Result<(), StoreError> {
        let account_id = party.account_id.clone();
        let total = self.mutate(Table::Parties, &self.parties, |parties| {
            if parties.contains_key(&party.account_id) {
                return Err(StoreError::DuplicateParty(party.account_id.clone()));
            }
            if parties
                .values()
                .any(|p| same_name(&p.display_name, &party.display_name))
            {
                return Err(StoreError::DuplicateParty(party.display_name.clone()));
            }
            if parties.len() >= cap {
                return Err(StoreError::ProgramFull { cap });
            }
            parties.insert(party.account_id.clone(), party);
            Ok(parties.len())
        })?;

        tracing::info!("[rc-01] Booster party {} added ({}/{})", account_id, total, cap);
        Ok(())
    }

    fn mark_payment_settled(&self, account_id: &str) -> Result<(), StoreError> {
        if self
            .parties
            .read()
            .get(account_id)
            .ok_or_else(|| StoreError::PartyNotFound(account_id.to_string()))?
            .payment_settled
        {
            return Ok(());
        }

        self.mutate(Table::Parties, &self.parties, |parties| {
            let party = parties
                .get_mut(account_id)
                .ok_or_else(|| StoreError::PartyNotFound(account_id.to_string()))?;
            party.payment_settled = true;
            Ok(())
        })?;

        tracing::info!("[rc-01] Payment settled for booster party {}", account_id);
        Ok(())
    }

    fn commit_party_bond(&self, account_id: &str, tx_id: &str) -> Result<(), StoreError> {
        self.mutate(Table::Parties, &self.parties, |parties| {
            let party = parties
                .get_mut(account_id)
                .ok_or_else(|| StoreError::PartyNotFound(account_id.to_string()))?;
            if check_write_once(account_id, &party.bond_tx_id, tx_id)? {
                party.bond_tx_id = tx_id.to_string();
            }
            Ok(())
        })?;

        tracing::info!("[rc-01] ✅ Booster bond for {} recorded as {}", account_id, tx_id);
        Ok(())
    }

    fn is_whitelisted(&self, account_id: &str) -> bool {
        self.whitelist.read().contains_key(account_id)
    }

    fn whitelist_entry(&self, account_id: &str) -> Option<WhitelistEntry> {
        self.whitelist.read().get(account_id).cloned()
    }

    fn whitelist(
        &self,
        account_id: &str,
        display_name: &str,
        authorized_by: &str,
    ) -> Result<WhitelistEntry, StoreError> {
        let entry = WhitelistEntry {
            account_id: account_id.to_string(),
            display_name: display_name.to_string(),
            authorized_by: authorized_by.to_string(),
        };

        self.mutate(Table::Whitelist, &self.whitelist, |whitelist| {
            if whitelist.contains_key(account_id) {
                return Err(StoreError::AlreadyWhitelisted(account_id.to_string()));
            }
            whitelist.insert(account_id.to_string(), entry.clone());
            Ok(())
        })?;

        tracing::info!(
            "[rc-01] Whitelisted {} ({}) by {}",
            display_name,
            account_id,
            authorized_by
        );
        Ok(entry)
    }

    fn booster_status_summary(&self) -> BoosterStatusSummary {
        let mut summary = BoosterStatusSummary::default();
        for party in self.parties.read().values() {
            summary.record(party);
        }
        summary.whitelisted = self.whitelist.read().len();
        summary
    }
}
