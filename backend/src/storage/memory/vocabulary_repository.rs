use anyhow::Result;
use shared::{VocabularyEntry, VocabularyKind};
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::storage::traits::VocabularyStorage;

/// User-added labels. Defaults are not stored here; they are fixed in the domain.
#[derive(Clone)]
pub struct VocabularyRepository {
    connection: Arc<MemoryConnection>,
}

impl VocabularyRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

fn same_label(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl VocabularyStorage for VocabularyRepository {
    fn list_custom(&self, kind: VocabularyKind) -> Result<Vec<VocabularyEntry>> {
        Ok(self.connection.read(|state| state.vocabulary.entries(kind).clone()))
    }

    fn insert_custom(&self, kind: VocabularyKind, entry: &VocabularyEntry) -> Result<bool> {
        self.connection.mutate(|state| {
            let entries = state.vocabulary.entries_mut(kind);
            if entries.iter().any(|existing| same_label(&existing.label, &entry.label)) {
                return false;
            }
            entries.push(entry.clone());
            true
        })
    }

    fn remove_custom(&self, kind: VocabularyKind, label: &str) -> Result<bool> {
        self.connection.mutate(|state| {
            let entries = state.vocabulary.entries_mut(kind);
            let before = entries.len();
            entries.retain(|existing| !same_label(&existing.label, label));
            entries.len() != before
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::test_utils::TestHelper;

    fn custom(label: &str) -> VocabularyEntry {
        VocabularyEntry { label: label.to_string(), icon: None, is_default: false }
    }

    #[test]
    fn test_insert_rejects_case_insensitive_duplicate() {
        let helper = TestHelper::new();
        assert!(helper.vocabulary_repo.insert_custom(VocabularyKind::BodyPart, &custom("Chin")).unwrap());
        assert!(!helper.vocabulary_repo.insert_custom(VocabularyKind::BodyPart, &custom("  CHIN ")).unwrap());

        let entries = helper.vocabulary_repo.list_custom(VocabularyKind::BodyPart).unwrap();
        assert_eq!(entries, vec![custom("Chin")]);
    }

    #[test]
    fn test_kinds_are_independent() {
        let helper = TestHelper::new();
        helper.vocabulary_repo.insert_custom(VocabularyKind::Exposure, &custom("Chin")).unwrap();
        assert!(helper.vocabulary_repo.list_custom(VocabularyKind::BodyPart).unwrap().is_empty());
    }

    #[test]
    fn test_remove_ignores_case() {
        let helper = TestHelper::new();
        helper.vocabulary_repo.insert_custom(VocabularyKind::SkinSign, &custom("Crusting")).unwrap();

        assert!(helper.vocabulary_repo.remove_custom(VocabularyKind::SkinSign, "crusting").unwrap());
        assert!(!helper.vocabulary_repo.remove_custom(VocabularyKind::SkinSign, "crusting").unwrap());
    }
}
