use std::sync::Arc;

use services::{Boot, Clock, PassengerService, PersistenceGateway};

pub trait UiApp: Send + Sync {
    /// Content and image statuses resolved before launch.
    fn boot(&self) -> Boot;
    fn gateway(&self) -> PersistenceGateway;
    fn passenger(&self) -> Arc<PassengerService>;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    boot: Boot,
    gateway: PersistenceGateway,
    passenger: Arc<PassengerService>,
    clock: Clock,
    rng_seed: Option<u64>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            boot: app.boot(),
            gateway: app.gateway(),
            passenger: app.passenger(),
            clock: app.clock(),
            rng_seed: None,
        }
    }

    /// Seed the boarding pass generator, for reproducible renders.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn boot(&self) -> &Boot {
        &self.boot
    }

    #[must_use]
    pub fn gateway(&self) -> PersistenceGateway {
        self.gateway.clone()
    }

    #[must_use]
    pub fn passenger(&self) -> Arc<PassengerService> {
        Arc::clone(&self.passenger)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
