//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Every mutating method is atomic: either the whole change (including any
//! invariant upkeep such as moving the active flag) is visible afterwards, or
//! none of it is.

use anyhow::Result;
use shared::{ActiveProtocol, CheckIn, Flare, Media, Pet, VocabularyEntry, VocabularyKind};

use super::snapshot::StoreSnapshot;

/// Trait defining the interface for pet storage operations
pub trait PetStorage: Send + Sync {
    /// Store a new pet. The pet becomes active when no other pet is.
    /// Returns the pet as stored.
    fn store_pet(&self, pet: &Pet) -> Result<Pet>;

    /// Retrieve a specific pet by ID
    fn get_pet(&self, pet_id: &str) -> Result<Option<Pet>>;

    /// List all pets in insertion order
    fn list_pets(&self) -> Result<Vec<Pet>>;

    /// Apply `edit` to the stored pet while holding the write lock.
    /// The id and `active` flag survive the edit. Returns None if the pet does not exist.
    fn modify_pet<F>(&self, pet_id: &str, edit: F) -> Result<Option<Pet>>
    where
        F: FnOnce(&mut Pet);

    /// Delete a pet. If it was active, the first remaining pet becomes active.
    /// Returns the removed pet, or None if it did not exist.
    fn delete_pet(&self, pet_id: &str) -> Result<Option<Pet>>;

    /// Get the currently active pet
    fn get_active_pet(&self) -> Result<Option<Pet>>;

    /// Make `pet_id` the only active pet.
    /// Returns false (and changes nothing) if the pet does not exist.
    fn set_active_pet(&self, pet_id: &str) -> Result<bool>;
}

/// Trait defining the interface for check-in storage operations
pub trait CheckInStorage: Send + Sync {
    /// Store a new check-in together with the media captured alongside it.
    /// Returns false (and stores nothing) if the owning pet does not exist.
    fn store_check_in(&self, check_in: &CheckIn, attachments: &[Media]) -> Result<bool>;

    fn get_check_in(&self, check_in_id: &str) -> Result<Option<CheckIn>>;

    /// List a pet's check-ins, most recent first
    fn list_check_ins(&self, pet_id: &str) -> Result<Vec<CheckIn>>;

    /// Apply `edit` to the stored check-in while holding the write lock.
    /// The id and owning pet survive the edit. Returns None if the check-in does not exist.
    fn modify_check_in<F>(&self, check_in_id: &str, edit: F) -> Result<Option<CheckIn>>
    where
        F: FnOnce(&mut CheckIn);

    /// Returns false if the check-in does not exist. Media pointing at it are kept.
    fn delete_check_in(&self, check_in_id: &str) -> Result<bool>;
}

/// Trait defining the interface for flare storage operations
pub trait FlareStorage: Send + Sync {
    /// Returns false (and stores nothing) if the owning pet does not exist
    fn store_flare(&self, flare: &Flare) -> Result<bool>;

    fn get_flare(&self, flare_id: &str) -> Result<Option<Flare>>;

    /// List a pet's flares, most recent first
    fn list_flares(&self, pet_id: &str) -> Result<Vec<Flare>>;

    /// Same contract as `CheckInStorage::modify_check_in`
    fn modify_flare<F>(&self, flare_id: &str, edit: F) -> Result<Option<Flare>>
    where
        F: FnOnce(&mut Flare);

    fn delete_flare(&self, flare_id: &str) -> Result<bool>;
}

/// Trait defining the interface for media storage operations
pub trait MediaStorage: Send + Sync {
    /// Returns false (and stores nothing) if the owning pet does not exist
    fn store_media(&self, media: &Media) -> Result<bool>;

    fn get_media(&self, media_id: &str) -> Result<Option<Media>>;

    /// List a pet's media, most recent first
    fn list_media(&self, pet_id: &str) -> Result<Vec<Media>>;

    /// Media whose weak back-reference points at `check_in_id`
    fn list_media_for_check_in(&self, check_in_id: &str) -> Result<Vec<Media>>;

    fn delete_media(&self, media_id: &str) -> Result<bool>;
}

/// Trait defining the interface for user-added vocabulary
pub trait VocabularyStorage: Send + Sync {
    /// Custom entries of one kind, in insertion order
    fn list_custom(&self, kind: VocabularyKind) -> Result<Vec<VocabularyEntry>>;

    /// Insert unless a custom entry with the same label (ignoring case) exists.
    /// Returns false when it was a duplicate.
    fn insert_custom(&self, kind: VocabularyKind, entry: &VocabularyEntry) -> Result<bool>;

    /// Remove a custom entry by label (ignoring case). Returns false if absent.
    fn remove_custom(&self, kind: VocabularyKind, label: &str) -> Result<bool>;
}

/// Trait defining the interface for the active protocol slot
pub trait ProtocolStorage: Send + Sync {
    fn get_protocol(&self) -> Result<Option<ActiveProtocol>>;

    /// Replace the protocol slot, returning what was there before
    fn replace_protocol(&self, protocol: Option<ActiveProtocol>) -> Result<Option<ActiveProtocol>>;

    /// Apply `edit` to the running protocol while holding the write lock.
    /// Returns None when no protocol is running.
    fn modify_protocol<F>(&self, edit: F) -> Result<Option<ActiveProtocol>>
    where
        F: FnOnce(&mut ActiveProtocol);
}

/// Trait defining the interface for account-level flags
pub trait AccountStorage: Send + Sync {
    fn is_premium(&self) -> Result<bool>;

    fn set_premium(&self, is_premium: bool) -> Result<()>;
}

/// Sink that receives a full snapshot after every committed mutation
pub trait SnapshotStorage: Send + Sync {
    fn save(&self, snapshot: &StoreSnapshot) -> Result<()>;

    /// The last saved snapshot, if any
    fn load(&self) -> Result<Option<StoreSnapshot>>;
}
