//! # Pet Itch Tracker Backend
//!
//! Session store and domain services for the egui frontend:
//! - Synchronous operations throughout
//! - Direct access to domain services, no IO/REST layer
//! - All services share one in-memory connection, so every view reads the
//!   same state the moment a mutation commits

use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use config::TrackerConfig;
pub use error::{StoreError, StoreResult};
pub use storage::memory::MemoryConnection;

use storage::memory::AccountRepository;
use storage::traits::{AccountStorage, SnapshotStorage};

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub pet_service: domain::PetService,
    pub check_in_service: domain::CheckInService,
    pub flare_service: domain::FlareService,
    pub media_service: domain::MediaService,
    pub vocabulary_service: domain::VocabularyService,
    pub protocol_service: domain::ProtocolService,
    pub analytics_service: domain::AnalyticsService,
    pub export_service: domain::ExportService,
    account_repository: AccountRepository,
}

impl Backend {
    /// Backend over a session-only store
    pub fn new(config: &TrackerConfig) -> Self {
        Self::from_connection(Arc::new(MemoryConnection::new()), config)
    }

    /// Backend whose store restores from and saves to `storage`
    pub fn with_storage(config: &TrackerConfig, storage: Box<dyn SnapshotStorage>) -> Self {
        let connection = Arc::new(MemoryConnection::open(storage, config.persist_retries));
        Self::from_connection(connection, config)
    }

    fn from_connection(connection: Arc<MemoryConnection>, config: &TrackerConfig) -> Self {
        let pet_service = domain::PetService::new(connection.clone());
        let check_in_service = domain::CheckInService::new(connection.clone(), pet_service.clone(), config);
        let flare_service = domain::FlareService::new(connection.clone(), pet_service.clone(), config);
        let media_service = domain::MediaService::new(connection.clone(), pet_service.clone(), config);
        let vocabulary_service = domain::VocabularyService::new(connection.clone(), config);
        let protocol_service = domain::ProtocolService::new(connection.clone(), config);
        let analytics_service = domain::AnalyticsService::new(connection.clone(), config);
        let export_service = domain::ExportService::new(connection.clone());
        let account_repository = AccountRepository::new(connection);

        Backend {
            pet_service,
            check_in_service,
            flare_service,
            media_service,
            vocabulary_service,
            protocol_service,
            analytics_service,
            export_service,
            account_repository,
        }
    }

    pub fn is_premium(&self) -> StoreResult<bool> {
        Ok(self.account_repository.is_premium()?)
    }

    pub fn set_premium(&self, is_premium: bool) -> StoreResult<()> {
        log::info!("Setting premium flag: {}", is_premium);
        Ok(self.account_repository.set_premium(is_premium)?)
    }
}
