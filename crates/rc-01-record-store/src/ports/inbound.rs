//! # Inbound Port - RecordStoreApi
//!
//! Primary driving port exposing the record tables.
//!
//! Every mutator returns only after the affected table is durable. The store
//! serializes individual calls; sequences that read, call out, then commit
//! must be serialized by the caller (see `shared_types::KeyedLocks`).

use shared_types::{
    BoosterStatusSummary, ClaimRecord, ClaimStatusSummary, IncentiveParty, WhitelistEntry,
};

use crate::domain::StoreError;

/// Primary API for the Record Store.
///
/// # Example
///
/// ```rust,ignore
/// use rc_01_record_store::RecordStoreApi;
///
/// fn settle(store: &dyn RecordStoreApi, addr: &str, tx: &str) {
///     if let Some(record) = store.lookup_claim(addr) {
///         if !record.is_claimed() {
///             store.commit_claim_transaction(addr, tx).unwrap();
///         }
///     }
/// }
/// ```
pub trait RecordStoreApi: Send + Sync {
    // -------------------------------------------------------------------------
    // Claims
    // -------------------------------------------------------------------------

    /// Claim record for a testnet address.
    fn lookup_claim(&self, testnet_addr: &str) -> Option<ClaimRecord>;

    /// Record the bonding transaction of a claim.
    ///
    /// # Errors
    /// - `ClaimNotFound`: no record for the address
    /// - `EmptyTxId`: `tx_id` is empty
    /// - `AlreadyClaimed`: a different transaction is already recorded
    /// - `Persist`: the table could not be written (in-memory state unchanged)
    ///
    /// Recording the same id twice is a no-op success.
    fn commit_claim_transaction(&self, testnet_addr: &str, tx_id: &str) -> Result<(), StoreError>;

    /// Claimed vs. unclaimed counts and amounts.
    fn claim_status_summary(&self) -> ClaimStatusSummary;

    // -------------------------------------------------------------------------
    // Booster parties
    // -------------------------------------------------------------------------

    /// Party by display name, case-insensitive.
    fn lookup_incentive_party(&self, display_name: &str) -> Option<IncentiveParty>;

    /// Party by account id.
    fn party_by_account(&self, account_id: &str) -> Option<IncentiveParty>;

    /// Upsert a party keyed by its account id.
    fn save_incentive_party(&self, party: IncentiveParty) -> Result<(), StoreError>;

    /// Insert a new party, re-checking uniqueness and the program cap under
    /// the table lock.
    ///
    /// # Errors
    /// - `DuplicateParty`: account id or display name already present
    /// - `ProgramFull`: `cap` parties already exist
    /// - `Persist`: the table could not be written
    fn insert_incentive_party(&self, party: IncentiveParty, cap: usize) -> Result<(), StoreError>;

    /// Mark a party's payment as settled. Idempotent.
    fn mark_payment_settled(&self, account_id: &str) -> Result<(), StoreError>;

    /// Record the bonding transaction of a party. Same write-once rules as
    /// [`RecordStoreApi::commit_claim_transaction`].
    fn commit_party_bond(&self, account_id: &str, tx_id: &str) -> Result<(), StoreError>;

    // -------------------------------------------------------------------------
    // Whitelist
    // -------------------------------------------------------------------------

    /// Returns true when the account is whitelisted.
    fn is_whitelisted(&self, account_id: &str) -> bool;

    /// Whitelist entry for the account.
    fn whitelist_entry(&self, account_id: &str) -> Option<WhitelistEntry>;

    /// Whitelist an account. Entries are never mutated afterwards.
    ///
    /// # Errors
    /// - `AlreadyWhitelisted`: the account id is already present
    /// - `Persist`: the table could not be written
    fn whitelist(
        &self,
        account_id: &str,
        display_name: &str,
        authorized_by: &str,
    ) -> Result<WhitelistEntry, StoreError>;

    /// Aggregate over parties and whitelist.
    fn booster_status_summary(&self) -> BoosterStatusSummary;
}
