//! Export and import of the whole store as a JSON snapshot.
//!
//! Import replaces everything: pets, entries, custom vocabulary, the running
//! protocol and the premium flag. A snapshot from a newer format version, or
//! one that breaks a store invariant (duplicate ids, itch levels off the
//! scale, a protocol day out of range), is refused before anything is touched.

use log::{info, warn};
use std::sync::Arc;

use crate::error::StoreResult;
use crate::storage::memory::{MemoryConnection, StoreState};
use crate::storage::snapshot::StoreSnapshot;

/// Counts of what an import brought in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub pets: usize,
    pub check_ins: usize,
    pub flares: usize,
    pub media: usize,
}

#[derive(Clone)]
pub struct ExportService {
    connection: Arc<MemoryConnection>,
}

impl ExportService {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }

    /// Current state as pretty-printed JSON
    pub fn export_json(&self) -> StoreResult<String> {
        let snapshot = self.connection.read(StoreState::to_snapshot);
        info!(
            "Exporting {} pets, {} check-ins, {} flares, {} media",
            snapshot.pets.len(),
            snapshot.check_ins.len(),
            snapshot.flares.len(),
            snapshot.media.len()
        );
        Ok(snapshot.to_json()?)
    }

    /// Replace the store with the contents of `json`
    pub fn import_json(&self, json: &str) -> StoreResult<ImportSummary> {
        let snapshot = StoreSnapshot::from_json(json)?;
        if let Err(e) = snapshot.validate() {
            warn!("Refusing snapshot import: {}", e);
            return Err(e);
        }

        let summary = ImportSummary {
            pets: snapshot.pets.len(),
            check_ins: snapshot.check_ins.len(),
            flares: snapshot.flares.len(),
            media: snapshot.media.len(),
        };
        self.connection.replace(StoreState::from_snapshot(snapshot))?;

        info!("Imported {:?}", summary);
        Ok(summary)
    }
}
