//! Error type returned by every store operation.
//!
//! All variants are local and recoverable: UI forms match on them to show a
//! message and carry on.

use shared::VocabularyKind;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("\"{label}\" already exists as a {kind}")]
    DuplicateLabel { kind: VocabularyKind, label: String },
    #[error("Cannot activate pet: {0}")]
    InvalidActivation(String),
    #[error("Itch level must be between 0 and 10, got {0}")]
    ItchLevelOutOfRange(u8),
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("No protocol is running")]
    NoActiveProtocol,
    #[error("Snapshot version {0} is newer than this build understands")]
    UnsupportedSnapshotVersion(u32),
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        StoreError::NotFound { entity, id: id.to_string() }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
