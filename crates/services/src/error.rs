//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::ContentError;
use quiz_core::session::SessionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ContentLoader`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentLoadError {
    #[error("content request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("no embedded fallback content is configured")]
    NoFallback,
}

/// Errors emitted by `QuizController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no question data is available")]
    NoContent,
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted by `PassengerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PassengerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
