use std::sync::Arc;

use quiz_core::model::ContentModel;
use storage::repository::Storage;
use tracing::warn;

use crate::asset_prober::{AssetProber, ImageStatuses};
use crate::content_loader::ContentLoader;
use crate::error::AppServicesError;
use crate::passenger::PassengerService;
use crate::persistence::PersistenceGateway;

/// Assembles the storage-backed services the app needs.
#[derive(Clone)]
pub struct AppServices {
    gateway: PersistenceGateway,
    passenger: Arc<PassengerService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage))
    }

    /// Services over throwaway in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_storage(&Storage::in_memory())
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self {
            gateway: PersistenceGateway::new(Arc::clone(&storage.progress)),
            passenger: Arc::new(PassengerService::new(Arc::clone(&storage.passenger))),
        }
    }

    #[must_use]
    pub fn gateway(&self) -> PersistenceGateway {
        self.gateway.clone()
    }

    #[must_use]
    pub fn passenger(&self) -> Arc<PassengerService> {
        Arc::clone(&self.passenger)
    }
}

/// Everything resolved before the first render.
#[derive(Clone, Debug, Default)]
pub struct Boot {
    pub content: Option<Arc<ContentModel>>,
    pub images: ImageStatuses,
}

/// Load content and probe its images. A load failure yields a `Boot` without content.
pub async fn boot(loader: &ContentLoader, mut prober: AssetProber) -> Boot {
    let content = match loader.load().await {
        Ok(content) => Arc::new(content),
        Err(err) => {
            warn!(error = %err, "no question data available");
            return Boot::default();
        }
    };
    prober.preflight(&content).await;
    Boot {
        content: Some(content),
        images: prober.into_statuses(),
    }
}
