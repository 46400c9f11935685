//! Wire shapes for the records kept in client storage.
//!
//! Progress is stored as `{"trackId": "...", "correctSet": {"0": true, "3": true}}`
//! under [`PROGRESS_KEY`]; the passenger name is stored verbatim under [`PASSENGER_KEY`].

use std::collections::BTreeMap;

use quiz_core::model::TrackId;
use quiz_core::session::ProgressSnapshot;
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

pub const PROGRESS_KEY: &str = "quiz.progress.v1";
pub const PASSENGER_KEY: &str = "quiz.passenger.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub track_id: String,
    pub correct_set: BTreeMap<String, bool>,
}

impl SnapshotRecord {
    #[must_use]
    pub fn from_snapshot(snapshot: &ProgressSnapshot) -> Self {
        Self {
            track_id: snapshot.track_id.as_str().to_string(),
            correct_set: snapshot
                .correct
                .iter()
                .map(|idx| (idx.to_string(), true))
                .collect(),
        }
    }

    /// Convert back into the domain snapshot. Entries set to `false` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for a blank track id or a non-numeric index.
    pub fn into_snapshot(self) -> Result<ProgressSnapshot, StorageError> {
        if self.track_id.trim().is_empty() {
            return Err(StorageError::Serialization("missing trackId".into()));
        }
        let mut correct = Vec::with_capacity(self.correct_set.len());
        for (key, flag) in self.correct_set {
            let idx = key
                .parse::<usize>()
                .map_err(|_| StorageError::Serialization(format!("invalid index: {key}")))?;
            if flag {
                correct.push(idx);
            }
        }
        Ok(ProgressSnapshot::new(TrackId::new(self.track_id), correct))
    }
}

/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_snapshot(snapshot: &ProgressSnapshot) -> Result<String, StorageError> {
    serde_json::to_string(&SnapshotRecord::from_snapshot(snapshot))
        .map_err(|err| StorageError::Serialization(err.to_string()))
}

/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or missing fields.
pub fn decode_snapshot(raw: &str) -> Result<ProgressSnapshot, StorageError> {
    let record: SnapshotRecord =
        serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))?;
    record.into_snapshot()
}
