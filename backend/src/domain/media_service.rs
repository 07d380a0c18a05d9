use chrono::Utc;
use log::{debug, info, warn};
use shared::Media;
use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::domain::commands::media::AddMediaCommand;
use crate::domain::pet_service::PetService;
use crate::domain::validation::{optional_text, required_text};
use crate::error::{StoreError, StoreResult};
use crate::storage::memory::{CheckInRepository, MediaRepository, MemoryConnection};
use crate::storage::traits::{CheckInStorage, MediaStorage};

const MAX_URI_LENGTH: usize = 2048;

/// Service for the photo/video gallery
#[derive(Clone)]
pub struct MediaService {
    connection: Arc<MemoryConnection>,
    media_repository: MediaRepository,
    check_in_repository: CheckInRepository,
    pet_service: PetService,
    max_notes_length: usize,
}

impl MediaService {
    pub fn new(connection: Arc<MemoryConnection>, pet_service: PetService, config: &TrackerConfig) -> Self {
        Self {
            media_repository: MediaRepository::new(connection.clone()),
            check_in_repository: CheckInRepository::new(connection.clone()),
            connection,
            pet_service,
            max_notes_length: config.max_notes_length,
        }
    }

    /// Add a media item. A `check_in_id` must name an existing check-in at the
    /// time of creation; afterwards it is only a weak back-reference.
    pub fn add_media(&self, command: AddMediaCommand) -> StoreResult<Media> {
        info!("Adding {} media: pet_id={:?}", command.media_type, command.pet_id);

        let uri = required_text("Media URI", &command.uri, MAX_URI_LENGTH)?;
        let notes = optional_text("Notes", command.notes, self.max_notes_length)?;
        let pet_id = self.pet_service.resolve_pet_id(command.pet_id)?;

        if let Some(check_in_id) = &command.check_in_id {
            if self.check_in_repository.get_check_in(check_in_id)?.is_none() {
                warn!("Media references unknown check-in: {}", check_in_id);
                return Err(StoreError::not_found("Check-in", check_in_id));
            }
        }

        let media = Media {
            id: self.connection.next_id("media"),
            pet_id,
            date: command.date.unwrap_or_else(Utc::now),
            media_type: command.media_type,
            uri,
            area: command.area.filter(|area| !area.trim().is_empty()),
            notes,
            check_in_id: command.check_in_id,
        };

        if !self.media_repository.store_media(&media)? {
            return Err(StoreError::not_found("Pet", &media.pet_id));
        }

        info!("Added media {} for pet {}", media.id, media.pet_id);
        Ok(media)
    }

    pub fn get_media(&self, media_id: &str) -> StoreResult<Option<Media>> {
        debug!("Getting media: {}", media_id);
        Ok(self.media_repository.get_media(media_id)?)
    }

    /// A pet's gallery, most recent first
    pub fn list_media(&self, pet_id: &str) -> StoreResult<Vec<Media>> {
        Ok(self.media_repository.list_media(pet_id)?)
    }

    /// Media captured with a check-in. Works even after the check-in is deleted.
    pub fn media_for_check_in(&self, check_in_id: &str) -> StoreResult<Vec<Media>> {
        Ok(self.media_repository.list_media_for_check_in(check_in_id)?)
    }

    pub fn delete_media(&self, media_id: &str) -> StoreResult<()> {
        info!("Deleting media: {}", media_id);

        if !self.media_repository.delete_media(media_id)? {
            warn!("Media not found for deletion: {}", media_id);
            return Err(StoreError::not_found("Media", media_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::check_in_service::CheckInService;
    use crate::domain::commands::check_ins::AddCheckInCommand;
    use crate::domain::commands::pets::AddPetCommand;
    use shared::{MediaType, PetBaseline, PetEnvironment, Species};

    struct TestContext {
        service: MediaService,
        check_in_service: CheckInService,
        pet_service: PetService,
    }

    fn setup_test() -> TestContext {
        let connection = Arc::new(MemoryConnection::new());
        let config = TrackerConfig::default();
        let pet_service = PetService::new(connection.clone());
        TestContext {
            service: MediaService::new(connection.clone(), pet_service.clone(), &config),
            check_in_service: CheckInService::new(connection, pet_service.clone(), &config),
            pet_service,
        }
    }

    fn add_pet(ctx: &TestContext) -> String {
        ctx.pet_service
            .add_pet(AddPetCommand {
                name: "Rex".to_string(),
                species: Species::Dog,
                breed: String::new(),
                age: String::new(),
                environment: PetEnvironment::Both,
                avatar: None,
                baseline: PetBaseline::default(),
            })
            .unwrap()
            .id
    }

    fn photo(uri: &str) -> AddMediaCommand {
        AddMediaCommand {
            pet_id: None,
            date: None,
            media_type: MediaType::Photo,
            uri: uri.to_string(),
            area: Some("Belly".to_string()),
            notes: None,
            check_in_id: None,
        }
    }

    #[test]
    fn test_add_and_list_media() {
        let ctx = setup_test();
        let pet_id = add_pet(&ctx);

        let media = ctx.service.add_media(photo("file:///belly.jpg")).unwrap();

        assert!(media.id.starts_with("media::"));
        assert_eq!(media.area.as_deref(), Some("Belly"));
        assert_eq!(ctx.service.list_media(&pet_id).unwrap(), vec![media]);
    }

    #[test]
    fn test_add_media_requires_uri() {
        let ctx = setup_test();
        add_pet(&ctx);
        assert!(matches!(ctx.service.add_media(photo("  ")), Err(StoreError::EmptyField(_))));
    }

    #[test]
    fn test_add_media_checks_check_in_reference() {
        let ctx = setup_test();
        add_pet(&ctx);

        let result = ctx.service.add_media(AddMediaCommand {
            check_in_id: Some("checkin::missing".to_string()),
            ..photo("file:///a.jpg")
        });
        assert!(matches!(result, Err(StoreError::NotFound { entity: "Check-in", .. })));

        let check_in = ctx
            .check_in_service
            .add_check_in(AddCheckInCommand { itch_level: 3, ..Default::default() })
            .unwrap();
        let media = ctx
            .service
            .add_media(AddMediaCommand {
                check_in_id: Some(check_in.id.clone()),
                ..photo("file:///b.jpg")
            })
            .unwrap();

        assert_eq!(ctx.service.media_for_check_in(&check_in.id).unwrap(), vec![media]);
    }

    #[test]
    fn test_same_millisecond_media_ids_do_not_collide() {
        let ctx = setup_test();
        add_pet(&ctx);

        let first = ctx.service.add_media(photo("file:///1.jpg")).unwrap();
        let second = ctx.service.add_media(photo("file:///2.jpg")).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_delete_media() {
        let ctx = setup_test();
        add_pet(&ctx);
        let media = ctx.service.add_media(photo("file:///belly.jpg")).unwrap();

        ctx.service.delete_media(&media.id).unwrap();

        assert!(ctx.service.get_media(&media.id).unwrap().is_none());
        assert!(matches!(ctx.service.delete_media(&media.id), Err(StoreError::NotFound { .. })));
    }
}
