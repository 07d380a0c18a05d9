//! # In-Memory Storage Module
//!
//! Session-scoped storage for the pet tracker: every table lives in process
//! memory behind one `MemoryConnection`, and each repository is a thin view
//! over it implementing the matching trait from `storage::traits`.
//!
//! The connection hands a snapshot of the full state to a `SnapshotStorage`
//! after every committed change. The default sink keeps it in memory only.

pub mod connection;
pub mod id_generator;
pub mod snapshot_storage;
pub mod pet_repository;
pub mod check_in_repository;
pub mod flare_repository;
pub mod media_repository;
pub mod vocabulary_repository;
pub mod protocol_repository;
pub mod account_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::{MemoryConnection, StoreState};
pub use snapshot_storage::InMemorySnapshotStorage;
pub use pet_repository::PetRepository;
pub use check_in_repository::CheckInRepository;
pub use flare_repository::FlareRepository;
pub use media_repository::MediaRepository;
pub use vocabulary_repository::VocabularyRepository;
pub use protocol_repository::ProtocolRepository;
pub use account_repository::AccountRepository;
