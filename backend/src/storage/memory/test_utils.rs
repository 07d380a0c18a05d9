//! Test helpers shared by storage and domain tests.

use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::{CheckIn, Pet, PetBaseline, PetEnvironment, Species};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::account_repository::AccountRepository;
use super::check_in_repository::CheckInRepository;
use super::connection::MemoryConnection;
use super::flare_repository::FlareRepository;
use super::media_repository::MediaRepository;
use super::pet_repository::PetRepository;
use super::protocol_repository::ProtocolRepository;
use super::vocabulary_repository::VocabularyRepository;
use crate::storage::snapshot::StoreSnapshot;
use crate::storage::traits::{PetStorage, SnapshotStorage};

/// Repository instances over one fresh connection
pub struct TestHelper {
    pub connection: Arc<MemoryConnection>,
    pub pet_repo: PetRepository,
    pub check_in_repo: CheckInRepository,
    pub flare_repo: FlareRepository,
    pub media_repo: MediaRepository,
    pub vocabulary_repo: VocabularyRepository,
    pub protocol_repo: ProtocolRepository,
    pub account_repo: AccountRepository,
}

impl TestHelper {
    pub fn new() -> Self {
        let connection = Arc::new(MemoryConnection::new());
        Self {
            pet_repo: PetRepository::new(connection.clone()),
            check_in_repo: CheckInRepository::new(connection.clone()),
            flare_repo: FlareRepository::new(connection.clone()),
            media_repo: MediaRepository::new(connection.clone()),
            vocabulary_repo: VocabularyRepository::new(connection.clone()),
            protocol_repo: ProtocolRepository::new(connection.clone()),
            account_repo: AccountRepository::new(connection.clone()),
            connection,
        }
    }

    /// Store a pet with a generated id
    pub fn create_test_pet(&self, name: &str) -> Pet {
        let pet = pet_fixture(&self.connection.next_id("pet"), name, false);
        self.pet_repo.store_pet(&pet).unwrap()
    }
}

pub fn pet_fixture(id: &str, name: &str, active: bool) -> Pet {
    let now = Utc::now();
    Pet {
        id: id.to_string(),
        name: name.to_string(),
        species: Species::Dog,
        breed: "Labrador".to_string(),
        age: "4 years".to_string(),
        environment: PetEnvironment::Both,
        avatar: None,
        active,
        baseline: PetBaseline::default(),
        created_at: now,
        updated_at: now,
    }
}

pub fn check_in_fixture(id: &str, pet_id: &str, itch_level: u8, date: DateTime<Utc>) -> CheckIn {
    CheckIn {
        id: id.to_string(),
        pet_id: pet_id.to_string(),
        date,
        itch_level,
        selected_parts: BTreeSet::from(["Paws".to_string()]),
        skin_signs: BTreeSet::new(),
        exposures: BTreeSet::new(),
        notes: None,
        image_uri: None,
        video_uri: None,
        audio_uri: None,
    }
}

/// Snapshot sink that fails the first `failures` saves
#[derive(Clone)]
pub struct FlakySnapshotStorage {
    remaining_failures: Arc<AtomicU32>,
    attempts: Arc<AtomicU32>,
}

impl FlakySnapshotStorage {
    pub fn failing(failures: u32) -> Self {
        Self {
            remaining_failures: Arc::new(AtomicU32::new(failures)),
            attempts: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn save_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl SnapshotStorage for FlakySnapshotStorage {
    fn save(&self, _snapshot: &StoreSnapshot) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            anyhow::bail!("disk full");
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<StoreSnapshot>> {
        Ok(None)
    }
}
