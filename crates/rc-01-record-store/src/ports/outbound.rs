//! Outbound (Driven) port: where table documents live.

use crate::domain::{StoreError, Table};

/// Durable storage for whole-table documents.
///
/// A document is replaced as a unit; implementations must make `save`
/// atomic (a crash leaves either the old or the new document, never a mix).
pub trait DocumentStorage: Send + Sync {
    /// Read the document for `table`.
    ///
    /// # Errors
    /// `Load` when the document is missing or unreadable.
    fn load(&self, table: Table) -> Result<Vec<u8>, StoreError>;

    /// Replace the document for `table`.
    ///
    /// # Errors
    /// `Persist` when the write did not become durable.
    fn save(&self, table: Table, document: &[u8]) -> Result<(), StoreError>;
}

impl<S: DocumentStorage + ?Sized> DocumentStorage for std::sync::Arc<S> {
    fn load(&self, table: Table) -> Result<Vec<u8>, StoreError> {
        (**self).load(table)
    }

    fn save(&self, table: Table, document: &[u8]) -> Result<(), StoreError> {
        (**self).save(table, document)
    }
}
