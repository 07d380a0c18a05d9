use chrono::Utc;
use log::{debug, info, warn};
use shared::Pet;
use std::sync::Arc;

use crate::domain::commands::pets::{AddPetCommand, UpdatePetCommand};
use crate::domain::validation::{required_text, MAX_PET_NAME_LENGTH};
use crate::error::{StoreError, StoreResult};
use crate::storage::memory::{MemoryConnection, PetRepository};
use crate::storage::traits::PetStorage;

/// Service for managing pets and the active-pet selection
#[derive(Clone)]
pub struct PetService {
    connection: Arc<MemoryConnection>,
    pet_repository: PetRepository,
}

impl PetService {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        let pet_repository = PetRepository::new(connection.clone());
        Self { connection, pet_repository }
    }

    /// Add a pet. The first pet ever added becomes the active pet.
    /// Duplicate names are allowed.
    pub fn add_pet(&self, command: AddPetCommand) -> StoreResult<Pet> {
        info!("Adding pet: name={}, species={:?}", command.name, command.species);

        let name = required_text("Pet name", &command.name, MAX_PET_NAME_LENGTH)?;
        let now = Utc::now();
        let pet = Pet {
            id: self.connection.next_id("pet"),
            name,
            species: command.species,
            breed: command.breed.trim().to_string(),
            age: command.age.trim().to_string(),
            environment: command.environment,
            avatar: command.avatar,
            active: false,
            baseline: command.baseline,
            created_at: now,
            updated_at: now,
        };

        let stored = self.pet_repository.store_pet(&pet)?;
        info!("Added pet {} with ID: {} (active: {})", stored.name, stored.id, stored.active);
        Ok(stored)
    }

    pub fn get_pet(&self, pet_id: &str) -> StoreResult<Option<Pet>> {
        debug!("Getting pet: {}", pet_id);
        Ok(self.pet_repository.get_pet(pet_id)?)
    }

    /// All pets in the order they were added
    pub fn list_pets(&self) -> StoreResult<Vec<Pet>> {
        Ok(self.pet_repository.list_pets()?)
    }

    /// Merge the provided fields into an existing pet. `active` is only
    /// changed through `set_active_pet`.
    pub fn update_pet(&self, command: UpdatePetCommand) -> StoreResult<Pet> {
        info!("Updating pet: {}", command.pet_id);

        let name = command
            .name
            .map(|name| required_text("Pet name", &name, MAX_PET_NAME_LENGTH))
            .transpose()?;

        self.pet_repository
            .modify_pet(&command.pet_id, |pet| {
                if let Some(name) = name {
                    pet.name = name;
                }
                if let Some(species) = command.species {
                    pet.species = species;
                }
                if let Some(breed) = command.breed {
                    pet.breed = breed.trim().to_string();
                }
                if let Some(age) = command.age {
                    pet.age = age.trim().to_string();
                }
                if let Some(environment) = command.environment {
                    pet.environment = environment;
                }
                if let Some(avatar) = command.avatar {
                    pet.avatar = avatar;
                }
                if let Some(baseline) = command.baseline {
                    pet.baseline = baseline;
                }
                pet.updated_at = Utc::now();
            })?
            .ok_or_else(|| {
                warn!("Pet not found for update: {}", command.pet_id);
                StoreError::not_found("Pet", &command.pet_id)
            })
    }

    /// Delete a pet. If it was active, the first remaining pet takes over;
    /// deleting the last pet leaves no active pet. Records owned by the pet are kept.
    pub fn delete_pet(&self, pet_id: &str) -> StoreResult<Pet> {
        info!("Deleting pet: {}", pet_id);

        let removed = self.pet_repository.delete_pet(pet_id)?.ok_or_else(|| {
            warn!("Pet not found for deletion: {}", pet_id);
            StoreError::not_found("Pet", pet_id)
        })?;

        info!("Deleted pet {} with ID: {}", removed.name, removed.id);
        Ok(removed)
    }

    pub fn get_active_pet(&self) -> StoreResult<Option<Pet>> {
        Ok(self.pet_repository.get_active_pet()?)
    }

    /// Make `pet_id` the only active pet
    pub fn set_active_pet(&self, pet_id: &str) -> StoreResult<Pet> {
        info!("Setting active pet: {}", pet_id);

        if !self.pet_repository.set_active_pet(pet_id)? {
            warn!("Cannot activate unknown pet: {}", pet_id);
            return Err(StoreError::InvalidActivation(format!("no pet with ID {}", pet_id)));
        }

        let pet = self
            .pet_repository
            .get_pet(pet_id)?
            .ok_or_else(|| StoreError::InvalidActivation(format!("no pet with ID {}", pet_id)))?;
        info!("Active pet is now {} ({})", pet.name, pet.id);
        Ok(pet)
    }

    /// The pet a new record belongs to: the given one if it exists, else the active pet
    pub fn resolve_pet_id(&self, pet_id: Option<String>) -> StoreResult<String> {
        match pet_id {
            Some(pet_id) => {
                if self.pet_repository.get_pet(&pet_id)?.is_none() {
                    return Err(StoreError::not_found("Pet", &pet_id));
                }
                Ok(pet_id)
            }
            None => self
                .pet_repository
                .get_active_pet()?
                .map(|pet| pet.id)
                .ok_or_else(|| StoreError::InvalidActivation("no active pet".to_string())),
        }
    }
}
