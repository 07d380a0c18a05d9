//! # In-Memory Connection
//!
//! Owns the canonical tables for every entity behind a single lock. All
//! repositories share one connection, so a mutation that touches several
//! tables (adding a check-in with its media, deleting the active pet) is still
//! one atomic step.
//!
//! Mutations are applied to a copy of the state. The copy is offered to the
//! configured `SnapshotStorage`; only when that succeeds is it swapped in.

use anyhow::Result;
use log::{debug, error, info, warn};
use shared::{ActiveProtocol, CheckIn, Flare, Media, Pet};
use std::sync::{PoisonError, RwLock};

use super::id_generator::IdGenerator;
use super::snapshot_storage::InMemorySnapshotStorage;
use crate::storage::snapshot::{CustomVocabulary, StoreSnapshot, SNAPSHOT_VERSION};
use crate::storage::traits::SnapshotStorage;

/// Canonical tables. Holds no derived aggregates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub pets: Vec<Pet>,
    pub check_ins: Vec<CheckIn>,
    pub flares: Vec<Flare>,
    pub media: Vec<Media>,
    pub vocabulary: CustomVocabulary,
    pub protocol: Option<ActiveProtocol>,
    pub is_premium: bool,
}

impl StoreState {
    pub fn active_pet(&self) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.active)
    }

    pub fn has_pet(&self, pet_id: &str) -> bool {
        self.pets.iter().any(|pet| pet.id == pet_id)
    }

    /// Make `pet_id` the only active pet. Returns false if it does not exist.
    pub fn activate(&mut self, pet_id: &str) -> bool {
        if !self.has_pet(pet_id) {
            return false;
        }
        for pet in self.pets.iter_mut() {
            pet.active = pet.id == pet_id;
        }
        true
    }

    /// Restore the single-active-pet invariant: keep the first active pet,
    /// or activate the first pet when none is active.
    pub fn normalize_activation(&mut self) {
        let keep = self
            .active_pet()
            .or_else(|| self.pets.first())
            .map(|pet| pet.id.clone());
        if let Some(pet_id) = keep {
            self.activate(&pet_id);
        }
    }

    pub fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            version: SNAPSHOT_VERSION,
            pets: self.pets.clone(),
            check_ins: self.check_ins.clone(),
            flares: self.flares.clone(),
            media: self.media.clone(),
            custom_vocabulary: self.vocabulary.clone(),
            active_pet_id: self.active_pet().map(|pet| pet.id.clone()),
            active_protocol: self.protocol.clone(),
            is_premium: self.is_premium,
        }
    }

    /// Every entity id held by the store
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.pets
            .iter()
            .map(|pet| pet.id.as_str())
            .chain(self.check_ins.iter().map(|check_in| check_in.id.as_str()))
            .chain(self.flares.iter().map(|flare| flare.id.as_str()))
            .chain(self.media.iter().map(|media| media.id.as_str()))
    }

    /// Build state from a snapshot that passed `StoreSnapshot::validate`.
    /// `active_pet_id` wins over the per-pet flags; otherwise the first pet
    /// flagged active is kept and every other flag is cleared.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut state = StoreState {
            pets: snapshot.pets,
            check_ins: snapshot.check_ins,
            flares: snapshot.flares,
            media: snapshot.media,
            vocabulary: snapshot.custom_vocabulary,
            protocol: snapshot.active_protocol,
            is_premium: snapshot.is_premium,
        };

        let activated = snapshot
            .active_pet_id
            .as_deref()
            .map(|pet_id| state.activate(pet_id))
            .unwrap_or(false);
        if !activated {
            state.normalize_activation();
        }
        state
    }
}

/// Shared handle to the in-memory tables
pub struct MemoryConnection {
    state: RwLock<StoreState>,
    storage: Box<dyn SnapshotStorage>,
    ids: IdGenerator,
    persist_retries: u32,
}

impl MemoryConnection {
    /// Connection with no durable storage behind it
    pub fn new() -> Self {
        Self::open(Box::new(InMemorySnapshotStorage::new()), 1)
    }

    /// Open a connection over `storage`, restoring its last snapshot if it has one.
    /// A snapshot that cannot be read is logged and the store starts empty.
    pub fn open(storage: Box<dyn SnapshotStorage>, persist_retries: u32) -> Self {
        let state = match storage.load() {
            Ok(Some(snapshot)) => match snapshot.validate() {
                Ok(()) => {
                    info!(
                        "Restored store snapshot v{} with {} pets",
                        snapshot.version,
                        snapshot.pets.len()
                    );
                    StoreState::from_snapshot(snapshot)
                }
                Err(e) => {
                    warn!("Ignoring stored snapshot, starting empty: {}", e);
                    StoreState::default()
                }
            },
            Ok(None) => {
                debug!("No stored snapshot, starting empty");
                StoreState::default()
            }
            Err(e) => {
                warn!("Failed to load store snapshot, starting empty: {:#}", e);
                StoreState::default()
            }
        };

        let ids = IdGenerator::new();
        ids.skip_past(state.ids());

        Self {
            state: RwLock::new(state),
            storage,
            ids,
            persist_retries,
        }
    }

    /// Run `f` against a consistent view of the state
    pub fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Apply `f` to a copy of the state, persist the copy, then commit it.
    /// If persisting fails the visible state is unchanged.
    pub fn mutate<T>(&self, f: impl FnOnce(&mut StoreState) -> T) -> Result<T> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = state.clone();
        let output = f(&mut next);

        if next != *state {
            self.persist(&next.to_snapshot())?;
            *state = next;
        }
        Ok(output)
    }

    /// Swap in a whole new state, e.g. after an import. Ids generated
    /// afterwards never collide with the ids it brings in.
    pub fn replace(&self, next: StoreState) -> Result<()> {
        self.ids.skip_past(next.ids());
        self.mutate(|state| *state = next)
    }

    /// Fresh id of the form `{prefix}::{epoch_millis}_{sequence}`
    pub fn next_id(&self, prefix: &str) -> String {
        self.ids.next(prefix)
    }

    fn persist(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let mut attempt = 0;
        loop {
            match self.storage.save(snapshot) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.persist_retries => {
                    attempt += 1;
                    warn!("Snapshot save failed, retrying ({}/{}): {:#}", attempt, self.persist_retries, e);
                }
                Err(e) => {
                    error!("Snapshot save failed after {} retries: {:#}", attempt, e);
                    return Err(e.context("Failed to persist store snapshot"));
                }
            }
        }
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}
