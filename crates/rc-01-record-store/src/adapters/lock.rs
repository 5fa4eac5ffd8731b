//! # Data Directory Locking
//!
//! Keeps a second process from opening the same data directory. Two writers
//! replacing the same table document would silently lose each other's
//! commits, which for the claim table means paying twice.
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::StoreError;

/// Exclusive lock on a data directory, released on drop.
///
/// The `LOCK` file itself is never removed. Unlinking it would let a process
/// blocked on the old inode and a newcomer on a fresh file both hold "the"
/// lock.
///
/// ```ignore
/// let lock = DataDirLock::acquire(Path::new("/var/lib/reward-core"))?;
/// // held until `lock` goes out of scope
/// ```
#[derive(Debug)]
pub struct DataDirLock {
    file: File,
    path: PathBuf,
    pid: u32,
}

impl DataDirLock {
    const LOCK_FILE: &'static str = "LOCK";

    /// Acquire the lock, failing fast if another process holds it.
    ///
    /// # Errors
    /// `StoreError::Locked` when the directory is in use or the lock file
    /// cannot be written.
    pub fn acquire(data_dir: &Path) -> Result<Self, StoreError> {
        let lock_path = data_dir.join(Self::LOCK_FILE);

        // Do not truncate before locking: the holder's PID is still needed
        // for the error message.
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| StoreError::Locked(format!("{}: {e}", lock_path.display())))?;

        if file.try_lock_exclusive().is_err() {
            let holder = Self::read_existing_pid(&lock_path)
                .map(|pid| format!(" by process {pid}"))
                .unwrap_or_default();
            return Err(StoreError::Locked(format!(
                "{} in use{holder}",
                data_dir.display()
            )));
        }

        let pid = std::process::id();
        file.set_len(0)
            .and_then(|_| writeln!(file, "{pid}"))
            .and_then(|_| file.sync_all())
            .map_err(|e| StoreError::Locked(format!("{}: {e}", lock_path.display())))?;

        tracing::debug!("[rc-01] locked data directory {}", data_dir.display());

        Ok(Self {
            file,
            path: lock_path,
            pid,
        })
    }

    /// PID written into the lock file.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_writes_pid() {
        let dir = tempfile::tempdir().unwrap();
        let lock = DataDirLock::acquire(dir.path()).expect("should acquire lock");

        let content = std::fs::read_to_string(lock.path()).unwrap();
        assert_eq!(content.trim().parse::<u32>().unwrap(), std::process::id());
        assert_eq!(lock.pid(), std::process::id());
    }

    #[test]
    fn test_second_lock_fails() {
        let dir = tempfile::tempdir().unwrap();
        let _held = DataDirLock::acquire(dir.path()).unwrap();

        let result = DataDirLock::acquire(dir.path());
        assert!(matches!(result, Err(StoreError::Locked(_))));
    }

    #[test]
    fn test_lock_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        {
            let _lock = DataDirLock::acquire(dir.path()).unwrap();
        }
        assert!(dir.path().join("LOCK").exists());
        DataDirLock::acquire(dir.path()).expect("should reacquire after drop");
    }

    #[test]
    fn test_lock_file_is_reused_across_holders() {
        let dir = tempfile::tempdir().unwrap();
        let first_path = {
            let lock = DataDirLock::acquire(dir.path()).unwrap();
            lock.path().to_path_buf()
        };

        let second = DataDirLock::acquire(dir.path()).unwrap();
        assert_eq!(second.path(), first_path);
        assert!(matches!(
            DataDirLock::acquire(dir.path()),
            Err(StoreError::Locked(_))
        ));

        let content = std::fs::read_to_string(second.path()).unwrap();
        assert_eq!(content.trim().parse::<u32>().unwrap(), second.pid());
    }
}
