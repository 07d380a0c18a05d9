//! # Vocabulary Service
//!
//! The tag lists offered on the check-in form: body parts, skin signs and
//! exposures. Each list is a fixed set of defaults followed by whatever the
//! user has added. Labels are unique per list ignoring case, across defaults
//! and customs alike. Defaults can never be removed.

use log::{info, warn};
use shared::{TagIcon, VocabularyEntry, VocabularyKind};
use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::domain::validation::required_text;
use crate::error::{StoreError, StoreResult};
use crate::storage::memory::{MemoryConnection, VocabularyRepository};
use crate::storage::traits::VocabularyStorage;

pub const DEFAULT_BODY_PARTS: &[&str] = &["Paws", "Ears", "Belly", "Armpits", "Face", "Back", "Legs", "Tail"];

/// (label, bundled icon id)
pub const DEFAULT_SKIN_SIGNS: &[(&str, &str)] = &[
    ("Redness", "skin-redness"),
    ("Bumps", "skin-bumps"),
    ("Hair loss", "skin-hair-loss"),
    ("Scabs", "skin-scabs"),
    ("Flaking", "skin-flaking"),
    ("Odor", "skin-odor"),
    ("Hot spots", "skin-hot-spot"),
];

/// (label, bundled icon id)
pub const DEFAULT_EXPOSURES: &[(&str, &str)] = &[
    ("New food", "exposure-food"),
    ("Treats", "exposure-treats"),
    ("Grass", "exposure-grass"),
    ("Bath", "exposure-bath"),
    ("Park walk", "exposure-park"),
    ("Pollen", "exposure-pollen"),
    ("Cleaning products", "exposure-cleaning"),
];

fn with_fixed_icons(defaults: &[(&str, &str)]) -> Vec<VocabularyEntry> {
    defaults
        .iter()
        .map(|(label, icon)| VocabularyEntry {
            label: label.to_string(),
            icon: Some(TagIcon::FixedIcon(icon.to_string())),
            is_default: true,
        })
        .collect()
}

/// Default entries of one kind, in display order
pub fn default_entries(kind: VocabularyKind) -> Vec<VocabularyEntry> {
    match kind {
        VocabularyKind::BodyPart => DEFAULT_BODY_PARTS
            .iter()
            .map(|label| VocabularyEntry {
                label: label.to_string(),
                icon: None,
                is_default: true,
            })
            .collect(),
        VocabularyKind::SkinSign => with_fixed_icons(DEFAULT_SKIN_SIGNS),
        VocabularyKind::Exposure => with_fixed_icons(DEFAULT_EXPOSURES),
    }
}

fn fold(label: &str) -> String {
    label.trim().to_lowercase()
}

#[derive(Clone)]
pub struct VocabularyService {
    vocabulary_repository: VocabularyRepository,
    max_label_length: usize,
}

impl VocabularyService {
    pub fn new(connection: Arc<MemoryConnection>, config: &TrackerConfig) -> Self {
        Self {
            vocabulary_repository: VocabularyRepository::new(connection),
            max_label_length: config.max_label_length,
        }
    }

    /// Defaults followed by custom entries
    pub fn vocabulary(&self, kind: VocabularyKind) -> StoreResult<Vec<VocabularyEntry>> {
        let mut entries = default_entries(kind);
        entries.extend(self.vocabulary_repository.list_custom(kind)?);
        Ok(entries)
    }

    pub fn custom_entries(&self, kind: VocabularyKind) -> StoreResult<Vec<VocabularyEntry>> {
        Ok(self.vocabulary_repository.list_custom(kind)?)
    }

    pub fn add_custom_body_part(&self, label: &str) -> StoreResult<VocabularyEntry> {
        self.add_custom(VocabularyKind::BodyPart, label, None)
    }

    pub fn remove_custom_body_part(&self, label: &str) -> StoreResult<bool> {
        self.remove_custom(VocabularyKind::BodyPart, label)
    }

    pub fn add_custom_skin_sign(&self, label: &str, emoji: Option<&str>) -> StoreResult<VocabularyEntry> {
        self.add_custom(VocabularyKind::SkinSign, label, emoji)
    }

    pub fn remove_custom_skin_sign(&self, label: &str) -> StoreResult<bool> {
        self.remove_custom(VocabularyKind::SkinSign, label)
    }

    pub fn add_custom_exposure(&self, label: &str, emoji: Option<&str>) -> StoreResult<VocabularyEntry> {
        self.add_custom(VocabularyKind::Exposure, label, emoji)
    }

    pub fn remove_custom_exposure(&self, label: &str) -> StoreResult<bool> {
        self.remove_custom(VocabularyKind::Exposure, label)
    }

    /// Add a user label. Rejected with `DuplicateLabel` if it matches any
    /// default or custom label of the same kind, ignoring case.
    pub fn add_custom(&self, kind: VocabularyKind, label: &str, emoji: Option<&str>) -> StoreResult<VocabularyEntry> {
        info!("Adding custom {}: {}", kind, label);

        let label = required_text("Label", label, self.max_label_length)?;
        let folded = fold(&label);
        let duplicate = || {
            warn!("Rejected duplicate {}: {}", kind, label);
            StoreError::DuplicateLabel { kind, label: label.clone() }
        };

        if default_entries(kind).iter().any(|entry| fold(&entry.label) == folded) {
            return Err(duplicate());
        }

        // Body parts carry no icon
        let icon = match kind {
            VocabularyKind::BodyPart => None,
            _ => emoji
                .map(str::trim)
                .filter(|emoji| !emoji.is_empty())
                .map(|emoji| TagIcon::CustomEmoji(emoji.to_string())),
        };
        let entry = VocabularyEntry { label: label.clone(), icon, is_default: false };

        if !self.vocabulary_repository.insert_custom(kind, &entry)? {
            return Err(duplicate());
        }
        Ok(entry)
    }

    /// Remove a user label. Defaults are never removed; returns whether a
    /// custom entry was removed.
    pub fn remove_custom(&self, kind: VocabularyKind, label: &str) -> StoreResult<bool> {
        info!("Removing custom {}: {}", kind, label);

        let removed = self.vocabulary_repository.remove_custom(kind, label)?;
        if !removed {
            warn!("No custom {} named {}", kind, label);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test() -> VocabularyService {
        VocabularyService::new(Arc::new(MemoryConnection::new()), &TrackerConfig::default())
    }

    #[test]
    fn test_default_body_part_blocks_custom_in_any_case() {
        let service = setup_test();

        for label in ["Paws", "paws", " PAWS "] {
            let result = service.add_custom_body_part(label);
            assert!(matches!(
                result,
                Err(StoreError::DuplicateLabel { kind: VocabularyKind::BodyPart, .. })
            ));
        }
        assert!(service.custom_entries(VocabularyKind::BodyPart).unwrap().is_empty());
    }

    #[test]
    fn test_custom_duplicate_rejected() {
        let service = setup_test();
        service.add_custom_body_part("Chin").unwrap();

        assert!(matches!(service.add_custom_body_part("CHIN"), Err(StoreError::DuplicateLabel { .. })));
        assert_eq!(service.custom_entries(VocabularyKind::BodyPart).unwrap().len(), 1);
    }

    #[test]
    fn test_vocabulary_lists_defaults_then_customs() {
        let service = setup_test();
        service.add_custom_exposure("Carpet cleaner", Some("🧽")).unwrap();

        let entries = service.vocabulary(VocabularyKind::Exposure).unwrap();

        assert_eq!(entries.len(), DEFAULT_EXPOSURES.len() + 1);
        assert!(entries[..DEFAULT_EXPOSURES.len()].iter().all(|entry| entry.is_default));
        let custom = entries.last().unwrap();
        assert_eq!(custom.label, "Carpet cleaner");
        assert_eq!(custom.icon, Some(TagIcon::CustomEmoji("🧽".to_string())));
        assert!(!custom.is_default);
    }

    #[test]
    fn test_default_exposures_use_fixed_icons() {
        let entries = default_entries(VocabularyKind::Exposure);
        assert!(entries.iter().all(|entry| matches!(entry.icon, Some(TagIcon::FixedIcon(_)))));
    }

    #[test]
    fn test_blank_emoji_means_no_icon() {
        let service = setup_test();
        let entry = service.add_custom_skin_sign("Crusting", Some("  ")).unwrap();
        assert_eq!(entry.icon, None);
    }

    #[test]
    fn test_empty_and_long_labels_rejected() {
        let service = setup_test();
        assert!(matches!(service.add_custom_skin_sign("   ", None), Err(StoreError::EmptyField(_))));
        assert!(matches!(
            service.add_custom_skin_sign(&"x".repeat(41), None),
            Err(StoreError::TooLong { .. })
        ));
    }

    #[test]
    fn test_defaults_cannot_be_removed() {
        let service = setup_test();

        assert!(!service.remove_custom_skin_sign("Redness").unwrap());

        let entries = service.vocabulary(VocabularyKind::SkinSign).unwrap();
        assert!(entries.iter().any(|entry| entry.label == "Redness"));
    }

    #[test]
    fn test_remove_custom_entry() {
        let service = setup_test();
        service.add_custom_exposure("Wool blanket", None).unwrap();

        assert!(service.remove_custom_exposure("wool BLANKET").unwrap());
        assert!(service.custom_entries(VocabularyKind::Exposure).unwrap().is_empty());
    }
}
