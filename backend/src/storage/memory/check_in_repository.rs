use anyhow::Result;
use log::debug;
use shared::{CheckIn, Media};
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::storage::traits::CheckInStorage;

#[derive(Clone)]
pub struct CheckInRepository {
    connection: Arc<MemoryConnection>,
}

impl CheckInRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl CheckInStorage for CheckInRepository {
    fn store_check_in(&self, check_in: &CheckIn, attachments: &[Media]) -> Result<bool> {
        self.connection.mutate(|state| {
            if !state.has_pet(&check_in.pet_id) {
                return false;
            }
            state.check_ins.push(check_in.clone());
            state.media.extend(attachments.iter().cloned());
            true
        })
    }

    fn get_check_in(&self, check_in_id: &str) -> Result<Option<CheckIn>> {
        Ok(self.connection.read(|state| {
            state.check_ins.iter().find(|check_in| check_in.id == check_in_id).cloned()
        }))
    }

    fn list_check_ins(&self, pet_id: &str) -> Result<Vec<CheckIn>> {
        let mut check_ins: Vec<CheckIn> = self.connection.read(|state| {
            state
                .check_ins
                .iter()
                .filter(|check_in| check_in.pet_id == pet_id)
                .cloned()
                .collect()
        });
        check_ins.sort_by(|a, b| b.date.cmp(&a.date));
        debug!("Found {} check-ins for pet {}", check_ins.len(), pet_id);
        Ok(check_ins)
    }

    fn modify_check_in<F>(&self, check_in_id: &str, edit: F) -> Result<Option<CheckIn>>
    where
        F: FnOnce(&mut CheckIn),
    {
        self.connection.mutate(|state| {
            let existing = state.check_ins.iter_mut().find(|check_in| check_in.id == check_in_id)?;
            let pet_id = existing.pet_id.clone();
            edit(existing);
            existing.id = check_in_id.to_string();
            existing.pet_id = pet_id;
            Some(existing.clone())
        })
    }

    fn delete_check_in(&self, check_in_id: &str) -> Result<bool> {
        self.connection.mutate(|state| {
            let before = state.check_ins.len();
            state.check_ins.retain(|check_in| check_in.id != check_in_id);
            state.check_ins.len() != before
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::test_utils::{check_in_fixture, TestHelper};
    use crate::storage::traits::MediaStorage;
    use chrono::{Duration, Utc};
    use shared::MediaType;

    #[test]
    fn test_store_requires_existing_pet() {
        let helper = TestHelper::new();
        let check_in = check_in_fixture("checkin::1", "pet::missing", 4, Utc::now());
        assert!(!helper.check_in_repo.store_check_in(&check_in, &[]).unwrap());
        assert!(helper.check_in_repo.get_check_in("checkin::1").unwrap().is_none());
    }

    #[test]
    fn test_store_with_attachments_is_atomic() {
        let helper = TestHelper::new();
        let pet = helper.create_test_pet("Rex");
        let check_in = check_in_fixture("checkin::1", &pet.id, 4, Utc::now());
        let photo = Media {
            id: "media::1".to_string(),
            pet_id: pet.id.clone(),
            date: check_in.date,
            media_type: MediaType::Photo,
            uri: "file:///paw.jpg".to_string(),
            area: None,
            notes: None,
            check_in_id: Some(check_in.id.clone()),
        };

        assert!(helper.check_in_repo.store_check_in(&check_in, &[photo]).unwrap());

        let attached = helper.media_repo.list_media_for_check_in("checkin::1").unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].id, "media::1");
    }

    #[test]
    fn test_list_is_newest_first_and_scoped_to_pet() {
        let helper = TestHelper::new();
        let rex = helper.create_test_pet("Rex");
        let mia = helper.create_test_pet("Mia");
        let now = Utc::now();

        for (id, pet_id, offset) in [("c1", &rex.id, 2), ("c2", &rex.id, 0), ("c3", &mia.id, 1), ("c4", &rex.id, 1)] {
            let check_in = check_in_fixture(id, pet_id, 3, now - Duration::days(offset));
            helper.check_in_repo.store_check_in(&check_in, &[]).unwrap();
        }

        let ids: Vec<String> = helper
            .check_in_repo
            .list_check_ins(&rex.id)
            .unwrap()
            .into_iter()
            .map(|check_in| check_in.id)
            .collect();
        assert_eq!(ids, vec!["c2", "c4", "c1"]);
    }

    #[test]
    fn test_modify_keeps_id_and_owner() {
        let helper = TestHelper::new();
        let pet = helper.create_test_pet("Rex");
        helper
            .check_in_repo
            .store_check_in(&check_in_fixture("checkin::1", &pet.id, 4, Utc::now()), &[])
            .unwrap();

        let modified = helper
            .check_in_repo
            .modify_check_in("checkin::1", |check_in| {
                check_in.itch_level = 8;
                check_in.id = "checkin::other".to_string();
                check_in.pet_id = "pet::other".to_string();
            })
            .unwrap()
            .unwrap();

        assert_eq!(modified.id, "checkin::1");
        assert_eq!(modified.pet_id, pet.id);
        assert_eq!(helper.check_in_repo.get_check_in("checkin::1").unwrap(), Some(modified));
        assert!(helper.check_in_repo.modify_check_in("checkin::9", |_| {}).unwrap().is_none());
    }

    #[test]
    fn test_delete_keeps_media_back_references() {
        let helper = TestHelper::new();
        let pet = helper.create_test_pet("Rex");
        let check_in = check_in_fixture("checkin::1", &pet.id, 4, Utc::now());
        let video = Media {
            id: "media::1".to_string(),
            pet_id: pet.id.clone(),
            date: check_in.date,
            media_type: MediaType::Video,
            uri: "file:///scratch.mp4".to_string(),
            area: Some("Ears".to_string()),
            notes: None,
            check_in_id: Some(check_in.id.clone()),
        };
        helper.check_in_repo.store_check_in(&check_in, &[video]).unwrap();

        assert!(helper.check_in_repo.delete_check_in("checkin::1").unwrap());
        assert!(!helper.check_in_repo.delete_check_in("checkin::1").unwrap());

        let media = helper.media_repo.get_media("media::1").unwrap().unwrap();
        assert_eq!(media.check_in_id.as_deref(), Some("checkin::1"));
    }
}
