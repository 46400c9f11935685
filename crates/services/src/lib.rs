#![forbid(unsafe_code)]

pub mod app_services;
pub mod asset_prober;
pub mod content_loader;
pub mod error;
pub mod passenger;
pub mod persistence;
pub mod quiz_controller;
pub mod view;

pub use quiz_core::Clock;

pub use app_services::{AppServices, Boot, boot};
pub use asset_prober::{AssetProber, ImageStatus, ImageStatuses};
pub use content_loader::{ContentConfig, ContentLoader, ContentSource};
pub use error::{AppServicesError, ContentLoadError, PassengerError, QuizError};
pub use passenger::PassengerService;
pub use persistence::PersistenceGateway;
pub use quiz_controller::QuizController;
pub use view::QuizView;
