//! Durable key-value storage for cross-session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists exactly one key (`token`). `FileStore` keeps one
//! file per key under the state directory; `MemoryStore` backs tests and
//! throwaway sessions.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
    #[error("storage io error for `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// Client-local persistent key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the value could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the key exists but could not be removed.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, as if `key` had been written by a previous run.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// One file per key inside `dir`. The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let Ok(path) = self.path_for(key) else {
            return None;
        };
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "failed to read storage entry");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_err = |source| StorageError::Io { key: key.to_owned(), source };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Write-then-rename so a crash never leaves a truncated value behind.
        let tmp = self.dir.join(format!(".{key}.tmp"));
        std::fs::write(&tmp, value).map_err(io_err)?;
        restrict_permissions(&tmp).map_err(io_err)?;
        std::fs::rename(&tmp, &path).map_err(io_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { key: key.to_owned(), source }),
        }
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
