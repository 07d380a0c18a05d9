use anyhow::Result;
use log::{debug, info};
use shared::Pet;
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::storage::traits::PetStorage;

/// In-memory pet table. Also owns the active-pet invariant: at most one pet
/// is active, and exactly one whenever any pet exists.
#[derive(Clone)]
pub struct PetRepository {
    connection: Arc<MemoryConnection>,
}

impl PetRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl PetStorage for PetRepository {
    fn store_pet(&self, pet: &Pet) -> Result<Pet> {
        self.connection.mutate(|state| {
            let mut stored = pet.clone();
            stored.active = state.active_pet().is_none();
            if stored.active {
                info!("Pet {} is the first pet, marking active", stored.id);
            }
            state.pets.push(stored.clone());
            stored
        })
    }

    fn get_pet(&self, pet_id: &str) -> Result<Option<Pet>> {
        Ok(self
            .connection
            .read(|state| state.pets.iter().find(|pet| pet.id == pet_id).cloned()))
    }

    fn list_pets(&self) -> Result<Vec<Pet>> {
        Ok(self.connection.read(|state| state.pets.clone()))
    }

    fn modify_pet<F>(&self, pet_id: &str, edit: F) -> Result<Option<Pet>>
    where
        F: FnOnce(&mut Pet),
    {
        self.connection.mutate(|state| {
            let existing = state.pets.iter_mut().find(|pet| pet.id == pet_id)?;
            let active = existing.active;
            edit(existing);
            existing.id = pet_id.to_string();
            existing.active = active;
            Some(existing.clone())
        })
    }

    fn delete_pet(&self, pet_id: &str) -> Result<Option<Pet>> {
        self.connection.mutate(|state| {
            let index = state.pets.iter().position(|pet| pet.id == pet_id)?;
            let removed = state.pets.remove(index);

            if removed.active {
                if let Some(next) = state.pets.first_mut() {
                    next.active = true;
                    info!("Active pet {} deleted, {} is now active", removed.id, next.id);
                } else {
                    info!("Last pet {} deleted, no active pet", removed.id);
                }
            }
            Some(removed)
        })
    }

    fn get_active_pet(&self) -> Result<Option<Pet>> {
        let active = self.connection.read(|state| state.active_pet().cloned());
        debug!("Active pet: {:?}", active.as_ref().map(|pet| &pet.id));
        Ok(active)
    }

    fn set_active_pet(&self, pet_id: &str) -> Result<bool> {
        self.connection.mutate(|state| state.activate(pet_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::test_utils::{pet_fixture, TestHelper};

    fn active_ids(repo: &PetRepository) -> Vec<String> {
        repo.list_pets()
            .unwrap()
            .into_iter()
            .filter(|pet| pet.active)
            .map(|pet| pet.id)
            .collect()
    }

    #[test]
    fn test_first_pet_becomes_active() {
        let helper = TestHelper::new();
        let stored = helper.pet_repo.store_pet(&pet_fixture("pet::1", "Rex", false)).unwrap();
        assert!(stored.active);

        let second = helper.pet_repo.store_pet(&pet_fixture("pet::2", "Mia", true)).unwrap();
        assert!(!second.active);
        assert_eq!(active_ids(&helper.pet_repo), vec!["pet::1"]);
    }

    #[test]
    fn test_modify_keeps_id_and_active_flag() {
        let helper = TestHelper::new();
        helper.pet_repo.store_pet(&pet_fixture("pet::1", "Rex", false)).unwrap();

        let modified = helper
            .pet_repo
            .modify_pet("pet::1", |pet| {
                pet.name = "Rexy".to_string();
                pet.id = "pet::other".to_string();
                pet.active = false;
            })
            .unwrap()
            .unwrap();

        assert_eq!(modified.id, "pet::1");
        let pet = helper.pet_repo.get_pet("pet::1").unwrap().unwrap();
        assert_eq!(pet.name, "Rexy");
        assert!(pet.active);
    }

    #[test]
    fn test_modify_missing_pet_returns_none() {
        let helper = TestHelper::new();
        assert!(helper.pet_repo.modify_pet("pet::9", |pet| pet.name.clear()).unwrap().is_none());
        assert!(helper.pet_repo.list_pets().unwrap().is_empty());
    }

    #[test]
    fn test_delete_active_pet_moves_activation_to_first_remaining() {
        let helper = TestHelper::new();
        helper.pet_repo.store_pet(&pet_fixture("pet::1", "Rex", false)).unwrap();
        helper.pet_repo.store_pet(&pet_fixture("pet::2", "Mia", false)).unwrap();
        helper.pet_repo.store_pet(&pet_fixture("pet::3", "Bo", false)).unwrap();
        helper.pet_repo.set_active_pet("pet::2").unwrap();

        let removed = helper.pet_repo.delete_pet("pet::2").unwrap().unwrap();

        assert_eq!(removed.id, "pet::2");
        assert_eq!(active_ids(&helper.pet_repo), vec!["pet::1"]);
    }

    #[test]
    fn test_delete_inactive_pet_keeps_activation() {
        let helper = TestHelper::new();
        helper.pet_repo.store_pet(&pet_fixture("pet::1", "Rex", false)).unwrap();
        helper.pet_repo.store_pet(&pet_fixture("pet::2", "Mia", false)).unwrap();

        helper.pet_repo.delete_pet("pet::2").unwrap();

        assert_eq!(active_ids(&helper.pet_repo), vec!["pet::1"]);
    }

    #[test]
    fn test_delete_last_pet_leaves_no_active_pet() {
        let helper = TestHelper::new();
        helper.pet_repo.store_pet(&pet_fixture("pet::1", "Rex", false)).unwrap();

        helper.pet_repo.delete_pet("pet::1").unwrap();

        assert!(helper.pet_repo.get_active_pet().unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_pet_returns_none() {
        let helper = TestHelper::new();
        assert!(helper.pet_repo.delete_pet("pet::9").unwrap().is_none());
    }

    #[test]
    fn test_set_active_pet_is_exclusive() {
        let helper = TestHelper::new();
        helper.pet_repo.store_pet(&pet_fixture("pet::1", "Rex", false)).unwrap();
        helper.pet_repo.store_pet(&pet_fixture("pet::2", "Mia", false)).unwrap();

        assert!(helper.pet_repo.set_active_pet("pet::2").unwrap());
        assert_eq!(active_ids(&helper.pet_repo), vec!["pet::2"]);

        assert!(!helper.pet_repo.set_active_pet("pet::9").unwrap());
        assert_eq!(active_ids(&helper.pet_repo), vec!["pet::2"]);
    }
}
