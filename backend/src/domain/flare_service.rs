use chrono::Utc;
use log::{debug, info, warn};
use shared::Flare;
use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::domain::commands::flares::{AddFlareCommand, UpdateFlareCommand};
use crate::domain::pet_service::PetService;
use crate::domain::validation::{optional_text, validate_itch_level};
use crate::error::{StoreError, StoreResult};
use crate::storage::memory::{FlareRepository, MemoryConnection};
use crate::storage::traits::FlareStorage;

/// Service for out-of-band flare events. Same lifecycle as check-ins, separate id space.
#[derive(Clone)]
pub struct FlareService {
    connection: Arc<MemoryConnection>,
    flare_repository: FlareRepository,
    pet_service: PetService,
    max_notes_length: usize,
}

impl FlareService {
    pub fn new(connection: Arc<MemoryConnection>, pet_service: PetService, config: &TrackerConfig) -> Self {
        let flare_repository = FlareRepository::new(connection.clone());
        Self {
            connection,
            flare_repository,
            pet_service,
            max_notes_length: config.max_notes_length,
        }
    }

    pub fn add_flare(&self, command: AddFlareCommand) -> StoreResult<Flare> {
        info!("Adding flare: pet_id={:?}, itch_level={}", command.pet_id, command.itch_level);

        validate_itch_level(command.itch_level)?;
        let notes = optional_text("Notes", command.notes, self.max_notes_length)?;
        let pet_id = self.pet_service.resolve_pet_id(command.pet_id)?;

        let flare = Flare {
            id: self.connection.next_id("flare"),
            pet_id,
            date: command.date.unwrap_or_else(Utc::now),
            itch_level: command.itch_level,
            triggers: command.triggers,
            notes,
            image_uri: command.image_uri,
        };

        if !self.flare_repository.store_flare(&flare)? {
            warn!("Pet disappeared before flare could be stored: {}", flare.pet_id);
            return Err(StoreError::not_found("Pet", &flare.pet_id));
        }

        info!("Added flare {} for pet {}", flare.id, flare.pet_id);
        Ok(flare)
    }

    pub fn get_flare(&self, flare_id: &str) -> StoreResult<Option<Flare>> {
        debug!("Getting flare: {}", flare_id);
        Ok(self.flare_repository.get_flare(flare_id)?)
    }

    /// A pet's flares, most recent first
    pub fn list_flares(&self, pet_id: &str) -> StoreResult<Vec<Flare>> {
        Ok(self.flare_repository.list_flares(pet_id)?)
    }

    pub fn update_flare(&self, command: UpdateFlareCommand) -> StoreResult<Flare> {
        info!("Updating flare: {}", command.flare_id);

        if let Some(itch_level) = command.itch_level {
            validate_itch_level(itch_level)?;
        }
        let notes = command
            .notes
            .map(|notes| optional_text("Notes", notes, self.max_notes_length))
            .transpose()?;

        self.flare_repository
            .modify_flare(&command.flare_id, |flare| {
                if let Some(itch_level) = command.itch_level {
                    flare.itch_level = itch_level;
                }
                if let Some(date) = command.date {
                    flare.date = date;
                }
                if let Some(triggers) = command.triggers {
                    flare.triggers = triggers;
                }
                if let Some(notes) = notes {
                    flare.notes = notes;
                }
                if let Some(image_uri) = command.image_uri {
                    flare.image_uri = image_uri;
                }
            })?
            .ok_or_else(|| StoreError::not_found("Flare", &command.flare_id))
    }

    pub fn delete_flare(&self, flare_id: &str) -> StoreResult<()> {
        info!("Deleting flare: {}", flare_id);

        if !self.flare_repository.delete_flare(flare_id)? {
            warn!("Flare not found for deletion: {}", flare_id);
            return Err(StoreError::not_found("Flare", flare_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::pets::AddPetCommand;
    use shared::{PetBaseline, PetEnvironment, Species};
    use std::collections::BTreeSet;

    fn setup_test() -> (FlareService, PetService) {
        let connection = Arc::new(MemoryConnection::new());
        let pet_service = PetService::new(connection.clone());
        let service = FlareService::new(connection, pet_service.clone(), &TrackerConfig::default());
        (service, pet_service)
    }

    fn add_pet(pet_service: &PetService, name: &str) -> String {
        pet_service
            .add_pet(AddPetCommand {
                name: name.to_string(),
                species: Species::Cat,
                breed: String::new(),
                age: String::new(),
                environment: PetEnvironment::Indoor,
                avatar: None,
                baseline: PetBaseline::default(),
            })
            .unwrap()
            .id
    }

    fn draft(itch_level: u8) -> AddFlareCommand {
        AddFlareCommand {
            itch_level,
            triggers: BTreeSet::from(["New food".to_string()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_and_get_flare() {
        let (service, pet_service) = setup_test();
        let pet_id = add_pet(&pet_service, "Miso");

        let flare = service.add_flare(draft(8)).unwrap();

        assert!(flare.id.starts_with("flare::"));
        assert_eq!(flare.pet_id, pet_id);
        assert_eq!(service.get_flare(&flare.id).unwrap(), Some(flare));
    }

    #[test]
    fn test_add_flare_for_explicit_pet() {
        let (service, pet_service) = setup_test();
        add_pet(&pet_service, "Miso");
        let other = add_pet(&pet_service, "Tofu");

        let flare = service
            .add_flare(AddFlareCommand { pet_id: Some(other.clone()), ..draft(3) })
            .unwrap();

        assert_eq!(flare.pet_id, other);
        assert_eq!(service.list_flares(&other).unwrap().len(), 1);
    }

    #[test]
    fn test_add_flare_rejects_out_of_range_itch() {
        let (service, pet_service) = setup_test();
        add_pet(&pet_service, "Miso");
        assert!(matches!(service.add_flare(draft(42)), Err(StoreError::ItchLevelOutOfRange(42))));
    }

    #[test]
    fn test_update_flare() {
        let (service, pet_service) = setup_test();
        add_pet(&pet_service, "Miso");
        let flare = service.add_flare(draft(8)).unwrap();

        let updated = service
            .update_flare(UpdateFlareCommand {
                flare_id: flare.id.clone(),
                triggers: Some(BTreeSet::from(["Grass".to_string()])),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.itch_level, 8);
        assert!(updated.triggers.contains("Grass"));
        assert!(!updated.triggers.contains("New food"));
    }

    #[test]
    fn test_missing_flare_is_not_found() {
        let (service, _) = setup_test();
        assert!(matches!(service.delete_flare("flare::missing"), Err(StoreError::NotFound { .. })));
        assert!(matches!(
            service.update_flare(UpdateFlareCommand {
                flare_id: "flare::missing".to_string(),
                ..Default::default()
            }),
            Err(StoreError::NotFound { entity: "Flare", .. })
        ));
    }

    #[test]
    fn test_delete_flare() {
        let (service, pet_service) = setup_test();
        let pet_id = add_pet(&pet_service, "Miso");
        let flare = service.add_flare(draft(8)).unwrap();

        service.delete_flare(&flare.id).unwrap();

        assert!(service.list_flares(&pet_id).unwrap().is_empty());
    }
}
