//! # Domain Layer
//!
//! Business rules for the pet tracker. Services validate input, generate ids
//! and timestamps, resolve the active pet and translate storage outcomes into
//! `StoreError`s. Storage repositories below them only keep the tables
//! consistent.
//!
//! `analytics` holds the pure calculations (streak, protocol progress, weekly
//! aggregates); `AnalyticsService` feeds them from the store.

pub mod analytics;
pub mod analytics_service;
pub mod check_in_service;
pub mod commands;
pub mod export_service;
pub mod flare_service;
pub mod media_service;
pub mod pet_service;
pub mod protocol_service;
pub mod validation;
pub mod vocabulary_service;

pub use analytics_service::AnalyticsService;
pub use check_in_service::CheckInService;
pub use export_service::{ExportService, ImportSummary};
pub use flare_service::FlareService;
pub use media_service::MediaService;
pub use pet_service::PetService;
pub use protocol_service::ProtocolService;
pub use vocabulary_service::VocabularyService;
