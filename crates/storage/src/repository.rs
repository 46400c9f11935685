use async_trait::async_trait;
use quiz_core::session::ProgressSnapshot;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::record::{PASSENGER_KEY, PROGRESS_KEY, decode_snapshot, encode_snapshot};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable record of quiz progress (one snapshot at a time).
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    async fn save_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError>;

    /// Read the stored snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored record is malformed, or other
    /// storage errors.
    async fn load_progress(&self) -> Result<Option<ProgressSnapshot>, StorageError>;

    /// Remove the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    async fn clear_progress(&self) -> Result<(), StorageError>;
}

/// Free-text passenger name shown on the boarding pass.
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn get_passenger_name(&self) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on write failures.
    async fn save_passenger_name(&self, name: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and `--memory` runs.
///
/// Records are kept as raw strings, exactly as the `SQLite` backend stores them.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a raw value under `key`, bypassing encoding. Useful to seed corrupt data.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.into());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn save_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        self.put_raw(PROGRESS_KEY, encode_snapshot(snapshot)?)
    }

    async fn load_progress(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        self.get_raw(PROGRESS_KEY)?
            .map(|raw| decode_snapshot(&raw))
            .transpose()
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        self.remove(PROGRESS_KEY)
    }
}

#[async_trait]
impl PassengerRepository for InMemoryRepository {
    async fn get_passenger_name(&self) -> Result<Option<String>, StorageError> {
        self.get_raw(PASSENGER_KEY)
    }

    async fn save_passenger_name(&self, name: &str) -> Result<(), StorageError> {
        self.put_raw(PASSENGER_KEY, name)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub passenger: Arc<dyn PassengerRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    /// Wrap an existing in-memory repository, keeping a handle for inspection.
    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let passenger: Arc<dyn PassengerRepository> = Arc::new(repo);
        Self {
            progress,
            passenger,
        }
    }
}
