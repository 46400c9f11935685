use chrono::Utc;
use quiz_core::session::ProgressSnapshot;
use sqlx::Row;

use super::SqliteRepository;
use crate::record::{PASSENGER_KEY, PROGRESS_KEY, decode_snapshot, encode_snapshot};
use crate::repository::{PassengerRepository, ProgressRepository, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

impl SqliteRepository {
    async fn get_record(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM records WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| StorageError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn put_record(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO records (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }

    async fn delete_record(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM records WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }

    /// Write a raw record, bypassing encoding.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the write fails.
    pub async fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.put_record(key, value).await
    }
}

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn save_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let raw = encode_snapshot(snapshot)?;
        self.put_record(PROGRESS_KEY, &raw).await
    }

    async fn load_progress(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        self.get_record(PROGRESS_KEY)
            .await?
            .map(|raw| decode_snapshot(&raw))
            .transpose()
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        self.delete_record(PROGRESS_KEY).await
    }
}

#[async_trait::async_trait]
impl PassengerRepository for SqliteRepository {
    async fn get_passenger_name(&self) -> Result<Option<String>, StorageError> {
        self.get_record(PASSENGER_KEY).await
    }

    async fn save_passenger_name(&self, name: &str) -> Result<(), StorageError> {
        self.put_record(PASSENGER_KEY, name).await
    }
}
