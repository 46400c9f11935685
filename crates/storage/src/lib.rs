#![forbid(unsafe_code)]

pub mod record;
pub mod repository;
pub mod sqlite;

pub use record::{PASSENGER_KEY, PROGRESS_KEY};
pub use repository::{
    InMemoryRepository, PassengerRepository, ProgressRepository, Storage, StorageError,
};
