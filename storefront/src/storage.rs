//! Durable session token storage.
//!
//! The session reducer stays pure; persistence happens inside effects that
//! talk to a [`TokenStore`]. Production wires up [`FileTokenStore`], tests
//! use [`MemoryTokenStore`].

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors from token persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable storage for the session token.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or `None` when no session is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Persists the token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be written.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Removes the stored token. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Token store backed by a single file on disk.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store persisting to the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let mut guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));

        assert_eq!(store.load().unwrap(), None);
        store.save("jwt-abc").unwrap();
        assert_eq!(store.load().unwrap(), Some("jwt-abc".to_string()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn file_store_treats_blank_file_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();
        let store = FileTokenStore::new(path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn memory_store_round_trips_token() {
        let store = MemoryTokenStore::new();
        store.save("jwt-xyz").unwrap();
        assert_eq!(store.load().unwrap(), Some("jwt-xyz".to_string()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
