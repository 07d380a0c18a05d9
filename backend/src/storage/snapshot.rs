//! # Store Snapshot
//!
//! Versioned serialization of everything the store holds. Used by the
//! `SnapshotStorage` boundary and by JSON export/import.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "pets": [...],
//!   "check_ins": [...],
//!   "flares": [...],
//!   "media": [...],
//!   "custom_vocabulary": { "body_parts": [...], "skin_signs": [...], "exposures": [...] },
//!   "active_pet_id": "pet::1718000000000_0",
//!   "active_protocol": { "name": "Elimination", "current_day": 3, "total_days": 14, "started_at": "..." },
//!   "is_premium": false
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared::{ActiveProtocol, CheckIn, Flare, Media, Pet, VocabularyEntry, VocabularyKind, MAX_ITCH_LEVEL};
use std::collections::HashSet;

use crate::error::{StoreError, StoreResult};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// User-added vocabulary, one list per kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomVocabulary {
    #[serde(default)]
    pub body_parts: Vec<VocabularyEntry>,
    #[serde(default)]
    pub skin_signs: Vec<VocabularyEntry>,
    #[serde(default)]
    pub exposures: Vec<VocabularyEntry>,
}

impl CustomVocabulary {
    pub fn entries(&self, kind: VocabularyKind) -> &Vec<VocabularyEntry> {
        match kind {
            VocabularyKind::BodyPart => &self.body_parts,
            VocabularyKind::SkinSign => &self.skin_signs,
            VocabularyKind::Exposure => &self.exposures,
        }
    }

    pub fn entries_mut(&mut self, kind: VocabularyKind) -> &mut Vec<VocabularyEntry> {
        match kind {
            VocabularyKind::BodyPart => &mut self.body_parts,
            VocabularyKind::SkinSign => &mut self.skin_signs,
            VocabularyKind::Exposure => &mut self.exposures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    #[serde(default)]
    pub pets: Vec<Pet>,
    #[serde(default)]
    pub check_ins: Vec<CheckIn>,
    #[serde(default)]
    pub flares: Vec<Flare>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub custom_vocabulary: CustomVocabulary,
    pub active_pet_id: Option<String>,
    pub active_protocol: Option<ActiveProtocol>,
    #[serde(default)]
    pub is_premium: bool,
}

impl StoreSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize store snapshot")
    }

    /// Parse a snapshot. The version is not checked here; callers decide
    /// what to do with newer formats.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse store snapshot")
    }

    pub fn is_supported(&self) -> bool {
        self.version <= SNAPSHOT_VERSION
    }

    /// Check everything the store's own operations guarantee: a known
    /// version, unique ids per table, itch levels on the 0-10 scale and a
    /// protocol day within `1..=total_days`. Active flags are not checked
    /// here; loading normalises them.
    pub fn validate(&self) -> StoreResult<()> {
        if !self.is_supported() {
            return Err(StoreError::UnsupportedSnapshotVersion(self.version));
        }

        ensure_unique_ids("pet", self.pets.iter().map(|pet| pet.id.as_str()))?;
        ensure_unique_ids("check-in", self.check_ins.iter().map(|check_in| check_in.id.as_str()))?;
        ensure_unique_ids("flare", self.flares.iter().map(|flare| flare.id.as_str()))?;
        ensure_unique_ids("media", self.media.iter().map(|media| media.id.as_str()))?;

        let itch_levels = self
            .check_ins
            .iter()
            .map(|check_in| check_in.itch_level)
            .chain(self.flares.iter().map(|flare| flare.itch_level));
        for itch_level in itch_levels {
            if itch_level > MAX_ITCH_LEVEL {
                return Err(StoreError::ItchLevelOutOfRange(itch_level));
            }
        }

        if let Some(protocol) = &self.active_protocol {
            if protocol.total_days == 0 || !(1..=protocol.total_days).contains(&protocol.current_day) {
                return Err(StoreError::InvalidSnapshot(format!(
                    "protocol {} is on day {} of {}",
                    protocol.name, protocol.current_day, protocol.total_days
                )));
            }
        }
        Ok(())
    }
}

fn ensure_unique_ids<'a>(entity: &str, ids: impl Iterator<Item = &'a str>) -> StoreResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StoreError::InvalidSnapshot(format!("duplicate {} id {}", entity, id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_fills_defaults() {
        let snapshot = StoreSnapshot::from_json(
            r#"{"version":1,"active_pet_id":null,"active_protocol":null}"#,
        )
        .unwrap();
        assert!(snapshot.pets.is_empty());
        assert!(snapshot.custom_vocabulary.exposures.is_empty());
        assert!(!snapshot.is_premium);
        assert!(snapshot.is_supported());
    }

    #[test]
    fn test_newer_version_is_flagged() {
        let snapshot = StoreSnapshot::from_json(
            r#"{"version":2,"active_pet_id":null,"active_protocol":null}"#,
        )
        .unwrap();
        assert!(!snapshot.is_supported());
    }

    fn valid_snapshot() -> StoreSnapshot {
        StoreSnapshot::from_json(
            r#"{
                "version": 1,
                "pets": [
                    {"id":"p1","name":"Rex","species":"Dog","breed":"","age":"","environment":"Indoor",
                     "avatar":null,"active":true,"baseline":{"flea_prevention":null,"hypoallergenic_diet":null},
                     "created_at":"2024-06-01T10:00:00Z","updated_at":"2024-06-01T10:00:00Z"}
                ],
                "check_ins": [
                    {"id":"c1","pet_id":"p1","date":"2024-06-02T10:00:00Z","itch_level":4,
                     "selected_parts":[],"skin_signs":[],"exposures":[],
                     "notes":null,"image_uri":null,"video_uri":null,"audio_uri":null}
                ],
                "active_pet_id": "p1",
                "active_protocol": {"name":"Elimination","current_day":3,"total_days":14,"started_at":"2024-06-01T10:00:00Z"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_snapshot_passes() {
        valid_snapshot().validate().unwrap();
    }

    #[test]
    fn test_duplicate_pet_ids_are_rejected() {
        let mut snapshot = valid_snapshot();
        let mut twin = snapshot.pets[0].clone();
        twin.name = "Twin".to_string();
        snapshot.pets.push(twin);

        assert!(matches!(snapshot.validate(), Err(StoreError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_duplicate_check_in_ids_are_rejected() {
        let mut snapshot = valid_snapshot();
        snapshot.check_ins.push(snapshot.check_ins[0].clone());

        assert!(matches!(snapshot.validate(), Err(StoreError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_itch_level_above_scale_is_rejected() {
        let mut snapshot = valid_snapshot();
        snapshot.check_ins[0].itch_level = 42;

        assert!(matches!(snapshot.validate(), Err(StoreError::ItchLevelOutOfRange(42))));
    }

    #[test]
    fn test_protocol_day_outside_range_is_rejected() {
        for (current_day, total_days) in [(0, 14), (15, 14), (99, 14), (1, 0)] {
            let mut snapshot = valid_snapshot();
            if let Some(protocol) = snapshot.active_protocol.as_mut() {
                protocol.current_day = current_day;
                protocol.total_days = total_days;
            }
            assert!(
                matches!(snapshot.validate(), Err(StoreError::InvalidSnapshot(_))),
                "day {} of {}",
                current_day,
                total_days
            );
        }
    }

    #[test]
    fn test_validate_rejects_newer_version() {
        let mut snapshot = valid_snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;
        assert!(matches!(snapshot.validate(), Err(StoreError::UnsupportedSnapshotVersion(_))));
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(StoreSnapshot::from_json("{not json").is_err());
    }
}
