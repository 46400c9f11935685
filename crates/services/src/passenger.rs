use std::sync::Arc;

use storage::repository::PassengerRepository;

use crate::error::PassengerError;

/// Reads and writes the passenger name printed on the boarding pass.
#[derive(Clone)]
pub struct PassengerService {
    repo: Arc<dyn PassengerRepository>,
}

impl PassengerService {
    #[must_use]
    pub fn new(repo: Arc<dyn PassengerRepository>) -> Self {
        Self { repo }
    }

    /// Stored name, or an empty string when none has been entered.
    ///
    /// # Errors
    ///
    /// Returns `PassengerError::Storage` if the record cannot be read.
    pub async fn name(&self) -> Result<String, PassengerError> {
        Ok(self.repo.get_passenger_name().await?.unwrap_or_default())
    }

    /// Store the name exactly as typed.
    ///
    /// # Errors
    ///
    /// Returns `PassengerError::Storage` if the record cannot be written.
    pub async fn set_name(&self, name: &str) -> Result<(), PassengerError> {
        self.repo.save_passenger_name(name).await?;
        Ok(())
    }
}
