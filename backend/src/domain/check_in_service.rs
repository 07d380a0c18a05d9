use chrono::Utc;
use log::{debug, info, warn};
use shared::{CheckIn, Media, MediaType};
use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::domain::commands::check_ins::{AddCheckInCommand, UpdateCheckInCommand};
use crate::domain::pet_service::PetService;
use crate::domain::validation::{optional_text, validate_itch_level};
use crate::error::{StoreError, StoreResult};
use crate::storage::memory::{CheckInRepository, MemoryConnection};
use crate::storage::traits::CheckInStorage;

/// Service for the daily check-in log
#[derive(Clone)]
pub struct CheckInService {
    connection: Arc<MemoryConnection>,
    check_in_repository: CheckInRepository,
    pet_service: PetService,
    max_notes_length: usize,
}

impl CheckInService {
    pub fn new(connection: Arc<MemoryConnection>, pet_service: PetService, config: &TrackerConfig) -> Self {
        let check_in_repository = CheckInRepository::new(connection.clone());
        Self {
            connection,
            check_in_repository,
            pet_service,
            max_notes_length: config.max_notes_length,
        }
    }

    /// Save a check-in. Attached photo/video URIs are also recorded as Media
    /// rows that point back at the new check-in.
    pub fn add_check_in(&self, command: AddCheckInCommand) -> StoreResult<CheckIn> {
        info!(
            "Adding check-in: pet_id={:?}, itch_level={}",
            command.pet_id, command.itch_level
        );

        validate_itch_level(command.itch_level)?;
        let notes = optional_text("Notes", command.notes, self.max_notes_length)?;
        let pet_id = self.pet_service.resolve_pet_id(command.pet_id)?;

        let check_in = CheckIn {
            id: self.connection.next_id("checkin"),
            pet_id,
            date: command.date.unwrap_or_else(Utc::now),
            itch_level: command.itch_level,
            selected_parts: command.selected_parts,
            skin_signs: command.skin_signs,
            exposures: command.exposures,
            notes,
            image_uri: command.image_uri,
            video_uri: command.video_uri,
            audio_uri: command.audio_uri,
        };

        let attachments = self.attachments_for(&check_in);
        if !self.check_in_repository.store_check_in(&check_in, &attachments)? {
            warn!("Pet disappeared before check-in could be stored: {}", check_in.pet_id);
            return Err(StoreError::not_found("Pet", &check_in.pet_id));
        }

        info!(
            "Added check-in {} for pet {} with {} attachment(s)",
            check_in.id,
            check_in.pet_id,
            attachments.len()
        );
        Ok(check_in)
    }

    pub fn get_check_in(&self, check_in_id: &str) -> StoreResult<Option<CheckIn>> {
        debug!("Getting check-in: {}", check_in_id);
        Ok(self.check_in_repository.get_check_in(check_in_id)?)
    }

    /// A pet's check-ins, most recent first
    pub fn list_check_ins(&self, pet_id: &str) -> StoreResult<Vec<CheckIn>> {
        Ok(self.check_in_repository.list_check_ins(pet_id)?)
    }

    /// Edit a check-in in place; the id and owning pet never change.
    /// Fields are merged under the store lock, so concurrent edits of
    /// different fields all land.
    pub fn update_check_in(&self, command: UpdateCheckInCommand) -> StoreResult<CheckIn> {
        info!("Updating check-in: {}", command.check_in_id);

        if let Some(itch_level) = command.itch_level {
            validate_itch_level(itch_level)?;
        }
        let notes = command
            .notes
            .map(|notes| optional_text("Notes", notes, self.max_notes_length))
            .transpose()?;

        let updated = self
            .check_in_repository
            .modify_check_in(&command.check_in_id, |check_in| {
                if let Some(itch_level) = command.itch_level {
                    check_in.itch_level = itch_level;
                }
                if let Some(date) = command.date {
                    check_in.date = date;
                }
                if let Some(selected_parts) = command.selected_parts {
                    check_in.selected_parts = selected_parts;
                }
                if let Some(skin_signs) = command.skin_signs {
                    check_in.skin_signs = skin_signs;
                }
                if let Some(exposures) = command.exposures {
                    check_in.exposures = exposures;
                }
                if let Some(notes) = notes {
                    check_in.notes = notes;
                }
                if let Some(image_uri) = command.image_uri {
                    check_in.image_uri = image_uri;
                }
                if let Some(video_uri) = command.video_uri {
                    check_in.video_uri = video_uri;
                }
                if let Some(audio_uri) = command.audio_uri {
                    check_in.audio_uri = audio_uri;
                }
            })?
            .ok_or_else(|| {
                warn!("Check-in not found for update: {}", command.check_in_id);
                StoreError::not_found("Check-in", &command.check_in_id)
            })?;

        info!("Updated check-in {}", updated.id);
        Ok(updated)
    }

    /// Delete a check-in. Media that referenced it stay in the gallery.
    pub fn delete_check_in(&self, check_in_id: &str) -> StoreResult<()> {
        info!("Deleting check-in: {}", check_in_id);

        if !self.check_in_repository.delete_check_in(check_in_id)? {
            warn!("Check-in not found for deletion: {}", check_in_id);
            return Err(StoreError::not_found("Check-in", check_in_id));
        }
        Ok(())
    }

    fn attachments_for(&self, check_in: &CheckIn) -> Vec<Media> {
        [
            (MediaType::Photo, check_in.image_uri.as_ref()),
            (MediaType::Video, check_in.video_uri.as_ref()),
        ]
        .into_iter()
        .filter_map(|(media_type, uri)| {
            uri.map(|uri| Media {
                id: self.connection.next_id("media"),
                pet_id: check_in.pet_id.clone(),
                date: check_in.date,
                media_type,
                uri: uri.clone(),
                area: None,
                notes: None,
                check_in_id: Some(check_in.id.clone()),
            })
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::pets::AddPetCommand;
    use crate::storage::memory::MediaRepository;
    use crate::storage::traits::MediaStorage;
    use shared::{PetBaseline, PetEnvironment, Species};
    use std::collections::{BTreeSet, HashSet};
    use std::sync::Barrier;
    use std::thread;

    struct TestContext {
        service: CheckInService,
        pet_service: PetService,
        media: MediaRepository,
    }

    fn setup_test() -> TestContext {
        let connection = Arc::new(MemoryConnection::new());
        let pet_service = PetService::new(connection.clone());
        let service = CheckInService::new(connection.clone(), pet_service.clone(), &TrackerConfig::default());
        TestContext { service, pet_service, media: MediaRepository::new(connection) }
    }

    fn add_pet(ctx: &TestContext, name: &str) -> String {
        ctx.pet_service
            .add_pet(AddPetCommand {
                name: name.to_string(),
                species: Species::Dog,
                breed: "Beagle".to_string(),
                age: "5".to_string(),
                environment: PetEnvironment::Outdoor,
                avatar: None,
                baseline: PetBaseline::default(),
            })
            .unwrap()
            .id
    }

    fn draft(itch_level: u8) -> AddCheckInCommand {
        AddCheckInCommand {
            itch_level,
            selected_parts: BTreeSet::from(["Paws".to_string(), "Ears".to_string()]),
            skin_signs: BTreeSet::from(["Redness".to_string()]),
            notes: Some("Licking after walk".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_check_in_defaults_to_active_pet() {
        let ctx = setup_test();
        let pet_id = add_pet(&ctx, "Rex");

        let check_in = ctx.service.add_check_in(draft(6)).unwrap();

        assert_eq!(check_in.pet_id, pet_id);
        assert!(check_in.id.starts_with("checkin::"));
        assert_eq!(ctx.service.get_check_in(&check_in.id).unwrap(), Some(check_in));
    }

    #[test]
    fn test_add_check_in_without_pets_is_invalid_activation() {
        let ctx = setup_test();
        assert!(matches!(ctx.service.add_check_in(draft(3)), Err(StoreError::InvalidActivation(_))));
    }

    #[test]
    fn test_add_check_in_rejects_out_of_range_itch() {
        let ctx = setup_test();
        add_pet(&ctx, "Rex");
        assert!(matches!(ctx.service.add_check_in(draft(11)), Err(StoreError::ItchLevelOutOfRange(11))));
    }

    #[test]
    fn test_rapid_check_ins_get_distinct_ids() {
        let ctx = setup_test();
        add_pet(&ctx, "Rex");

        let ids: HashSet<String> = (0..200)
            .map(|_| ctx.service.add_check_in(draft(2)).unwrap().id)
            .collect();

        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_attachments_create_back_referenced_media() {
        let ctx = setup_test();
        let pet_id = add_pet(&ctx, "Rex");

        let check_in = ctx
            .service
            .add_check_in(AddCheckInCommand {
                image_uri: Some("file:///belly.jpg".to_string()),
                video_uri: Some("file:///scratching.mp4".to_string()),
                audio_uri: Some("file:///note.m4a".to_string()),
                ..draft(7)
            })
            .unwrap();

        let media = ctx.media.list_media_for_check_in(&check_in.id).unwrap();
        assert_eq!(media.len(), 2);
        assert!(media.iter().all(|m| m.pet_id == pet_id));
        assert!(media.iter().any(|m| m.media_type == MediaType::Photo && m.uri == "file:///belly.jpg"));
        assert!(media.iter().any(|m| m.media_type == MediaType::Video && m.uri == "file:///scratching.mp4"));
        assert_ne!(media[0].id, media[1].id);
    }

    #[test]
    fn test_update_only_changes_given_fields() {
        let ctx = setup_test();
        add_pet(&ctx, "Rex");
        let original = ctx.service.add_check_in(draft(4)).unwrap();

        ctx.service
            .update_check_in(UpdateCheckInCommand {
                check_in_id: original.id.clone(),
                itch_level: Some(9),
                ..Default::default()
            })
            .unwrap();

        let stored = ctx.service.get_check_in(&original.id).unwrap().unwrap();
        assert_eq!(stored, CheckIn { itch_level: 9, ..original });
    }

    #[test]
    fn test_update_can_clear_notes() {
        let ctx = setup_test();
        add_pet(&ctx, "Rex");
        let original = ctx.service.add_check_in(draft(4)).unwrap();

        let updated = ctx
            .service
            .update_check_in(UpdateCheckInCommand {
                check_in_id: original.id,
                notes: Some(None),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.notes, None);
    }

    #[test]
    fn test_concurrent_updates_of_different_fields_both_land() {
        let ctx = setup_test();
        add_pet(&ctx, "Rex");

        for _ in 0..200 {
            let original = ctx.service.add_check_in(draft(4)).unwrap();
            let barrier = Arc::new(Barrier::new(2));

            let level_writer = {
                let service = ctx.service.clone();
                let barrier = Arc::clone(&barrier);
                let check_in_id = original.id.clone();
                thread::spawn(move || {
                    barrier.wait();
                    service
                        .update_check_in(UpdateCheckInCommand {
                            check_in_id,
                            itch_level: Some(9),
                            ..Default::default()
                        })
                        .unwrap();
                })
            };
            let notes_writer = {
                let service = ctx.service.clone();
                let barrier = Arc::clone(&barrier);
                let check_in_id = original.id.clone();
                thread::spawn(move || {
                    barrier.wait();
                    service
                        .update_check_in(UpdateCheckInCommand {
                            check_in_id,
                            notes: Some(Some("Licking paws".to_string())),
                            ..Default::default()
                        })
                        .unwrap();
                })
            };
            level_writer.join().unwrap();
            notes_writer.join().unwrap();

            let stored = ctx.service.get_check_in(&original.id).unwrap().unwrap();
            assert_eq!(stored.itch_level, 9);
            assert_eq!(stored.notes.as_deref(), Some("Licking paws"));
        }
    }

    #[test]
    fn test_update_nonexistent_check_in() {
        let ctx = setup_test();
        let result = ctx.service.update_check_in(UpdateCheckInCommand {
            check_in_id: "checkin::missing".to_string(),
            itch_level: Some(1),
            ..Default::default()
        });
        assert!(matches!(result, Err(StoreError::NotFound { entity: "Check-in", .. })));
    }

    #[test]
    fn test_delete_check_in_keeps_media() {
        let ctx = setup_test();
        add_pet(&ctx, "Rex");
        let check_in = ctx
            .service
            .add_check_in(AddCheckInCommand {
                image_uri: Some("file:///paw.jpg".to_string()),
                ..draft(5)
            })
            .unwrap();

        ctx.service.delete_check_in(&check_in.id).unwrap();

        assert!(ctx.service.get_check_in(&check_in.id).unwrap().is_none());
        assert_eq!(ctx.media.list_media_for_check_in(&check_in.id).unwrap().len(), 1);
        assert!(matches!(ctx.service.delete_check_in(&check_in.id), Err(StoreError::NotFound { .. })));
    }
}
