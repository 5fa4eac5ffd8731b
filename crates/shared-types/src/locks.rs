//! # Keyed Locks
//!
//! Per-key async mutual exclusion for read-check-commit sequences that span
//! remote calls.
//!
//! The record store serializes each individual mutation, but a workflow reads
//! a record, calls out to the chain, then commits. Two tasks interleaving that
//! sequence on the same key would both pass the "not yet claimed" check. A
//! workflow holds the key's guard for the whole sequence.
//!
//! Slots are created on first use and reclaimed when the last holder or
//! waiter goes away, so the map only grows with in-flight keys.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// A set of named async mutexes.
#[derive(Default)]
pub struct KeyedLocks {
    slots: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    /// Create an empty lock set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive ownership of `key`.
    pub async fn acquire(&self, key: &str) -> KeyGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock();
            slots
                .entry(key.to_owned())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = slot.lock_owned().await;
        KeyGuard {
            locks: self,
            key: key.to_owned(),
            guard: Some(guard),
        }
    }

    /// Number of keys currently held or waited on.
    pub fn active_keys(&self) -> usize {
        self.slots.lock().len()
    }
}

/// Exclusive ownership of one key. Released on drop.
pub struct KeyGuard<'a> {
    locks: &'a KeyedLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyGuard<'_> {
    /// The key this guard holds.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        // Release the mutex before inspecting the slot so our own Arc is gone.
        drop(self.guard.take());

        let mut slots = self.locks.slots.lock();
        if let Some(slot) = slots.get(&self.key) {
            if Arc::strong_count(slot) == 1 {
                slots.remove(&self.key);
            }
        }
    }
}
