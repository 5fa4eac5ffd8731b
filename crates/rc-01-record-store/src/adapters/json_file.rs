//! JSON file documents.
//!
//! Each table lives in its own file inside the data directory. Writes go to
//! a sibling `.tmp` file which is synced and then renamed over the target,
//! so a crash leaves either the previous or the new document.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{StoreError, Table};
use crate::ports::DocumentStorage;

#[cfg(feature = "locking")]
use super::lock::DataDirLock;

/// Table documents stored as JSON files in one directory.
#[derive(Debug)]
pub struct JsonFileDocuments {
    dir: PathBuf,
    #[cfg(feature = "locking")]
    _lock: DataDirLock,
}

impl JsonFileDocuments {
    /// Open an existing data directory and take its process lock.
    ///
    /// Table files are not touched here; a missing table surfaces as a
    /// `Load` error when the store opens.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(StoreError::Load {
                table: Table::Claims,
                reason: format!("data directory {} does not exist", dir.display()),
            });
        }

        #[cfg(feature = "locking")]
        let lock = DataDirLock::acquire(&dir)?;

        tracing::info!("[rc-01] 📁 Opened data directory {}", dir.display());

        Ok(Self {
            dir,
            #[cfg(feature = "locking")]
            _lock: lock,
        })
    }

    /// Create the data directory if needed and write an empty document for
    /// every table that has none. Existing documents are left alone.
    ///
    /// Returns the tables that were created.
    pub fn initialize<P: AsRef<Path>>(dir: P) -> Result<Vec<Table>, StoreError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| StoreError::Persist {
            table: Table::Claims,
            reason: format!("create {}: {e}", dir.display()),
        })?;

        let mut created = Vec::new();
        for table in Table::ALL {
            let path = dir.join(table.file_name());
            if path.exists() {
                continue;
            }
            write_atomic(&path, b"{}").map_err(|reason| StoreError::Persist { table, reason })?;
            tracing::info!("[rc-01] Created empty table {}", path.display());
            created.push(table);
        }
        Ok(created)
    }

    /// Data directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, table: Table) -> PathBuf {
        self.dir.join(table.file_name())
    }
}

impl DocumentStorage for JsonFileDocuments {
    fn load(&self, table: Table) -> Result<Vec<u8>, StoreError> {
        let path = self.path_of(table);
        let bytes = std::fs::read(&path).map_err(|e| StoreError::Load {
            table,
            reason: format!("{}: {e}", path.display()),
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(StoreError::Load {
                table,
                reason: format!("{} is empty", path.display()),
            });
        }

        tracing::debug!(
            "[rc-01] 💾 Read {} ({} bytes)",
            path.display(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn save(&self, table: Table, document: &[u8]) -> Result<(), StoreError> {
        write_atomic(&self.path_of(table), document)
            .map_err(|reason| StoreError::Persist { table, reason })
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let temp_path = path.with_extension("json.tmp");

    let mut file = std::fs::File::create(&temp_path).map_err(|e| e.to_string())?;
    file.write_all(bytes).map_err(|e| e.to_string())?;
    file.sync_all().map_err(|e| e.to_string())?;
    drop(file);

    std::fs::rename(&temp_path, path).map_err(|e| e.to_string())?;
    sync_parent(path)
}

/// Flush the directory entry so the rename survives a power loss.
#[cfg(unix)]
fn sync_parent(path: &Path) -> Result<(), String> {
    let dir = path
        .parent()
        .ok_or_else(|| format!("{} has no parent directory", path.display()))?;
    std::fs::File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| format!("syncing {}: {e}", dir.display()))
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> Result<(), String> {
    Ok(())
}
