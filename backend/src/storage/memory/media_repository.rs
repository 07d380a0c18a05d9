use anyhow::Result;
use log::debug;
use shared::Media;
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::storage::traits::MediaStorage;

#[derive(Clone)]
pub struct MediaRepository {
    connection: Arc<MemoryConnection>,
}

impl MediaRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl MediaStorage for MediaRepository {
    fn store_media(&self, media: &Media) -> Result<bool> {
        self.connection.mutate(|state| {
            if !state.has_pet(&media.pet_id) {
                return false;
            }
            state.media.push(media.clone());
            true
        })
    }

    fn get_media(&self, media_id: &str) -> Result<Option<Media>> {
        Ok(self
            .connection
            .read(|state| state.media.iter().find(|media| media.id == media_id).cloned()))
    }

    fn list_media(&self, pet_id: &str) -> Result<Vec<Media>> {
        let mut media: Vec<Media> = self.connection.read(|state| {
            state.media.iter().filter(|media| media.pet_id == pet_id).cloned().collect()
        });
        media.sort_by(|a, b| b.date.cmp(&a.date));
        debug!("Found {} media for pet {}", media.len(), pet_id);
        Ok(media)
    }

    fn list_media_for_check_in(&self, check_in_id: &str) -> Result<Vec<Media>> {
        Ok(self.connection.read(|state| {
            state
                .media
                .iter()
                .filter(|media| media.check_in_id.as_deref() == Some(check_in_id))
                .cloned()
                .collect()
        }))
    }

    fn delete_media(&self, media_id: &str) -> Result<bool> {
        self.connection.mutate(|state| {
            let before = state.media.len();
            state.media.retain(|media| media.id != media_id);
            state.media.len() != before
        })
    }
}
