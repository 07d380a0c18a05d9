use anyhow::Result;
use log::debug;
use shared::Flare;
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::storage::traits::FlareStorage;

#[derive(Clone)]
pub struct FlareRepository {
    connection: Arc<MemoryConnection>,
}

impl FlareRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl FlareStorage for FlareRepository {
    fn store_flare(&self, flare: &Flare) -> Result<bool> {
        self.connection.mutate(|state| {
            if !state.has_pet(&flare.pet_id) {
                return false;
            }
            state.flares.push(flare.clone());
            true
        })
    }

    fn get_flare(&self, flare_id: &str) -> Result<Option<Flare>> {
        Ok(self
            .connection
            .read(|state| state.flares.iter().find(|flare| flare.id == flare_id).cloned()))
    }

    fn list_flares(&self, pet_id: &str) -> Result<Vec<Flare>> {
        let mut flares: Vec<Flare> = self.connection.read(|state| {
            state.flares.iter().filter(|flare| flare.pet_id == pet_id).cloned().collect()
        });
        flares.sort_by(|a, b| b.date.cmp(&a.date));
        debug!("Found {} flares for pet {}", flares.len(), pet_id);
        Ok(flares)
    }

    fn modify_flare<F>(&self, flare_id: &str, edit: F) -> Result<Option<Flare>>
    where
        F: FnOnce(&mut Flare),
    {
        self.connection.mutate(|state| {
            let existing = state.flares.iter_mut().find(|flare| flare.id == flare_id)?;
            let pet_id = existing.pet_id.clone();
            edit(existing);
            existing.id = flare_id.to_string();
            existing.pet_id = pet_id;
            Some(existing.clone())
        })
    }

    fn delete_flare(&self, flare_id: &str) -> Result<bool> {
        self.connection.mutate(|state| {
            let before = state.flares.len();
            state.flares.retain(|flare| flare.id != flare_id);
            state.flares.len() != before
        })
    }
}
