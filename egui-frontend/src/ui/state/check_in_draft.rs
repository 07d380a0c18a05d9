//! # Check-in Draft
//!
//! What the check-in card holds between edits. The itch level is fed by the
//! slider's commit channel; tags are toggled from the vocabulary chips. A
//! draft either creates a new check-in or, after `load`, edits an existing one.

use pet_itch_tracker_backend::domain::commands::check_ins::{AddCheckInCommand, UpdateCheckInCommand};
use pet_itch_tracker_backend::domain::commands::flares::AddFlareCommand;
use shared::{CheckIn, VocabularyKind};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckInDraft {
    /// Set while editing an existing check-in
    pub editing: Option<String>,
    pub itch_level: u8,
    pub selected_parts: BTreeSet<String>,
    pub skin_signs: BTreeSet<String>,
    pub exposures: BTreeSet<String>,
    pub notes: String,
    pub image_uri: String,
}

impl CheckInDraft {
    /// Start editing `check_in`
    pub fn load(check_in: &CheckIn) -> Self {
        Self {
            editing: Some(check_in.id.clone()),
            itch_level: check_in.itch_level,
            selected_parts: check_in.selected_parts.clone(),
            skin_signs: check_in.skin_signs.clone(),
            exposures: check_in.exposures.clone(),
            notes: check_in.notes.clone().unwrap_or_default(),
            image_uri: check_in.image_uri.clone().unwrap_or_default(),
        }
    }

    pub fn tags(&self, kind: VocabularyKind) -> &BTreeSet<String> {
        match kind {
            VocabularyKind::BodyPart => &self.selected_parts,
            VocabularyKind::SkinSign => &self.skin_signs,
            VocabularyKind::Exposure => &self.exposures,
        }
    }

    pub fn toggle(&mut self, kind: VocabularyKind, label: &str) {
        let tags = match kind {
            VocabularyKind::BodyPart => &mut self.selected_parts,
            VocabularyKind::SkinSign => &mut self.skin_signs,
            VocabularyKind::Exposure => &mut self.exposures,
        };
        if !tags.remove(label) {
            tags.insert(label.to_string());
        }
    }

    pub fn to_add_command(&self) -> AddCheckInCommand {
        AddCheckInCommand {
            itch_level: self.itch_level,
            selected_parts: self.selected_parts.clone(),
            skin_signs: self.skin_signs.clone(),
            exposures: self.exposures.clone(),
            notes: non_blank(&self.notes),
            image_uri: non_blank(&self.image_uri),
            ..Default::default()
        }
    }

    /// Update command for the check-in being edited, if any
    pub fn to_update_command(&self) -> Option<UpdateCheckInCommand> {
        let check_in_id = self.editing.clone()?;
        Some(UpdateCheckInCommand {
            check_in_id,
            itch_level: Some(self.itch_level),
            selected_parts: Some(self.selected_parts.clone()),
            skin_signs: Some(self.skin_signs.clone()),
            exposures: Some(self.exposures.clone()),
            notes: Some(non_blank(&self.notes)),
            image_uri: Some(non_blank(&self.image_uri)),
            ..Default::default()
        })
    }

    /// The same draft logged as a flare; exposures become its triggers
    pub fn to_flare_command(&self) -> AddFlareCommand {
        AddFlareCommand {
            itch_level: self.itch_level,
            triggers: self.exposures.clone(),
            notes: non_blank(&self.notes),
            image_uri: non_blank(&self.image_uri),
            ..Default::default()
        }
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
