use anyhow::Result;
use log::debug;
use std::sync::{Arc, Mutex, PoisonError};

use crate::storage::snapshot::StoreSnapshot;
use crate::storage::traits::SnapshotStorage;

/// Keeps the last committed snapshot in process memory only.
/// Everything is lost when the process exits. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStorage {
    last: Arc<Mutex<Option<StoreSnapshot>>>,
}

impl InMemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for InMemorySnapshotStorage {
    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        *last = Some(snapshot.clone());
        debug!("Kept in-memory snapshot with {} pets", snapshot.pets.len());
        Ok(())
    }

    fn load(&self) -> Result<Option<StoreSnapshot>> {
        let last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(last.clone())
    }
}
