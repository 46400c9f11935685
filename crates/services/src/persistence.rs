use std::sync::Arc;

use quiz_core::session::{ProgressSnapshot, QuizSession};
use storage::repository::ProgressRepository;
use tracing::{info, warn};

/// Best-effort bridge between the session and durable storage.
///
/// Nothing here ever fails the caller: write errors are logged and dropped, and
/// unreadable snapshots are treated as absent.
#[derive(Clone)]
pub struct PersistenceGateway {
    progress: Arc<dyn ProgressRepository>,
}

impl PersistenceGateway {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressRepository>) -> Self {
        Self { progress }
    }

    pub async fn save(&self, snapshot: &ProgressSnapshot) {
        if let Err(err) = self.progress.save_progress(snapshot).await {
            warn!(error = %err, "failed to save progress");
        }
    }

    pub async fn load(&self) -> Option<ProgressSnapshot> {
        match self.progress.load_progress().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable progress snapshot");
                None
            }
        }
    }

    pub async fn clear(&self) {
        if let Err(err) = self.progress.clear_progress().await {
            warn!(error = %err, "failed to clear progress");
        }
    }

    /// Resume `session` from the stored snapshot when its track still exists.
    pub async fn restore(&self, session: &mut QuizSession) -> bool {
        let Some(snapshot) = self.load().await else {
            return false;
        };
        let resumed = session.resume(&snapshot);
        if resumed {
            info!(
                track = %snapshot.track_id,
                correct = snapshot.correct.len(),
                "resumed saved progress"
            );
        } else {
            info!(track = %snapshot.track_id, "saved track not in content; starting fresh");
        }
        resumed
    }
}
