use std::collections::HashMap;

use parking_lot::Mutex;

use crate::domain::{StoreError, Table};
use crate::ports::DocumentStorage;

/// In-memory documents for unit tests.
///
/// Every table starts as `{}`. `fail_saves` makes the next writes fail so
/// rollback paths can be exercised.
#[derive(Debug)]
pub struct InMemoryDocuments {
    docs: Mutex<HashMap<Table, Vec<u8>>>,
    fail_saves: Mutex<bool>,
}

impl Default for InMemoryDocuments {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocuments {
    /// Empty tables.
    pub fn new() -> Self {
        let docs = Table::ALL.iter().map(|t| (*t, b"{}".to_vec())).collect();
        Self {
            docs: Mutex::new(docs),
            fail_saves: Mutex::new(false),
        }
    }

    /// Seed a table with a raw document.
    pub fn with_document(self, table: Table, document: impl Into<Vec<u8>>) -> Self {
        self.docs.lock().insert(table, document.into());
        self
    }

    /// Remove a table's document entirely.
    pub fn without(self, table: Table) -> Self {
        self.docs.lock().remove(&table);
        self
    }

    /// Make every subsequent `save` fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock() = fail;
    }

    /// Current raw document of a table.
    pub fn document(&self, table: Table) -> Option<Vec<u8>> {
        self.docs.lock().get(&table).cloned()
    }
}

impl DocumentStorage for InMemoryDocuments {
    fn load(&self, table: Table) -> Result<Vec<u8>, StoreError> {
        match self.docs.lock().get(&table) {
            Some(doc) if !doc.is_empty() => Ok(doc.clone()),
            Some(_) => Err(StoreError::Load {
                table,
                reason: "document is empty".into(),
            }),
            None => Err(StoreError::Load {
                table,
                reason: "document does not exist".into(),
            }),
        }
    }

    fn save(&self, table: Table, document: &[u8]) -> Result<(), StoreError> {
        if *self.fail_saves.lock() {
            return Err(StoreError::Persist {
                table,
                reason: "injected write failure".into(),
            });
        }
        self.docs.lock().insert(table, document.to_vec());
        Ok(())
    }
}
