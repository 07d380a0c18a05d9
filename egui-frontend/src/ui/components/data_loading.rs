//! # Data Loading Module
//!
//! Bridge between the UI and the backend services. Every user action goes
//! through one of these methods: call the backend, report the outcome in the
//! message bar, then reload what is on screen.

use chrono::{Local, NaiveDate};
use log::{info, warn};
use pet_itch_tracker_backend::domain::commands::pets::AddPetCommand;
use pet_itch_tracker_backend::StoreResult;
use shared::{CheckIn, PetBaseline, PetEnvironment, VocabularyKind};

use crate::ui::app_state::{PetItchApp, VocabularyLists};
use crate::ui::state::CheckInDraft;

/// How many check-ins the history list shows
const RECENT_CHECK_IN_LIMIT: usize = 10;

impl PetItchApp {
    /// Reload everything shown on screen from the backend
    pub fn refresh(&mut self) {
        let today = Local::now().date_naive();
        if let Err(e) = self.load_dashboard(today) {
            warn!("Failed to refresh dashboard: {}", e);
            self.error_message = Some(format!("Failed to load data: {}", e));
        }
    }

    fn load_dashboard(&mut self, today: NaiveDate) -> StoreResult<()> {
        self.pets = self.backend.pet_service.list_pets()?;
        self.active_pet = self.backend.pet_service.get_active_pet()?;
        self.recent_check_ins = match &self.active_pet {
            Some(pet) => {
                let mut check_ins = self.backend.check_in_service.list_check_ins(&pet.id)?;
                check_ins.truncate(RECENT_CHECK_IN_LIMIT);
                check_ins
            }
            None => Vec::new(),
        };

        let analytics = &self.backend.analytics_service;
        self.streak = analytics.current_streak_on(today)?;
        self.checked_in_today = analytics.has_checked_in_on(today)?;
        self.weekly_summary = Some(analytics.weekly_summary(today)?);
        self.protocol = analytics.protocol_progress()?;

        let vocabulary = &self.backend.vocabulary_service;
        self.vocabulary = VocabularyLists {
            body_parts: vocabulary.vocabulary(VocabularyKind::BodyPart)?,
            skin_signs: vocabulary.vocabulary(VocabularyKind::SkinSign)?,
            exposures: vocabulary.vocabulary(VocabularyKind::Exposure)?,
        };
        self.is_premium = self.backend.is_premium()?;
        Ok(())
    }

    /// Pull the newest slider value into the draft
    pub fn drain_itch_commits(&mut self) {
        if let Some(itch_level) = self.itch_updates.latest() {
            self.draft.itch_level = itch_level;
        }
    }

    pub fn add_pet(&mut self) {
        let command = AddPetCommand {
            name: self.forms.new_pet_name.clone(),
            species: self.forms.new_pet_species,
            breed: String::new(),
            age: String::new(),
            environment: PetEnvironment::Indoor,
            avatar: None,
            baseline: PetBaseline::default(),
        };
        match self.backend.pet_service.add_pet(command) {
            Ok(pet) => {
                self.success_message = Some(format!("Added {}", pet.name));
                self.forms.new_pet_name.clear();
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }

    pub fn select_pet(&mut self, pet_id: &str) {
        info!("Selecting pet {}", pet_id);
        match self.backend.pet_service.set_active_pet(pet_id) {
            Ok(pet) => {
                self.clear_messages();
                self.draft = CheckInDraft::default();
                info!("Active pet is now {}", pet.name);
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }

    pub fn delete_pet(&mut self, pet_id: &str) {
        match self.backend.pet_service.delete_pet(pet_id) {
            Ok(pet) => self.success_message = Some(format!("Removed {}", pet.name)),
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }

    /// Save the check-in card, as a new check-in or as an edit
    pub fn save_check_in(&mut self) {
        let result = match self.draft.to_update_command() {
            Some(command) => self.backend.check_in_service.update_check_in(command).map(|_| "Check-in updated"),
            None => self
                .backend
                .check_in_service
                .add_check_in(self.draft.to_add_command())
                .map(|_| "Check-in saved"),
        };
        match result {
            Ok(message) => {
                self.success_message = Some(message.to_string());
                self.draft = CheckInDraft::default();
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }

    pub fn log_flare(&mut self) {
        match self.backend.flare_service.add_flare(self.draft.to_flare_command()) {
            Ok(flare) => self.success_message = Some(format!("Flare logged at itch level {}", flare.itch_level)),
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }

    /// Load a check-in into the card; the slider animates to its level
    pub fn edit_check_in(&mut self, check_in: &CheckIn) {
        info!("Editing check-in {}", check_in.id);
        self.draft = CheckInDraft::load(check_in);
    }

    pub fn delete_check_in(&mut self, check_in_id: &str) {
        match self.backend.check_in_service.delete_check_in(check_in_id) {
            Ok(()) => {
                if self.draft.editing.as_deref() == Some(check_in_id) {
                    self.draft = CheckInDraft::default();
                }
                self.success_message = Some("Check-in deleted".to_string());
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }

    pub fn start_protocol(&mut self) {
        match self.backend.protocol_service.start_protocol(&self.forms.new_protocol_name) {
            Ok(protocol) => {
                self.success_message = Some(format!("Started {} ({} days)", protocol.name, protocol.total_days));
                self.forms.new_protocol_name.clear();
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }

    pub fn advance_protocol_day(&mut self) {
        if let Err(e) = self.backend.protocol_service.advance_protocol_day() {
            self.error_message = Some(e.to_string());
        }
        self.refresh();
    }

    pub fn complete_protocol(&mut self) {
        match self.backend.protocol_service.complete_protocol() {
            Ok(protocol) => self.success_message = Some(format!("Completed {}", protocol.name)),
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }

    pub fn cancel_protocol(&mut self) {
        if let Err(e) = self.backend.protocol_service.cancel_protocol() {
            self.error_message = Some(e.to_string());
        }
        self.refresh();
    }

    pub fn add_custom_tag(&mut self, kind: VocabularyKind) {
        let emoji = Some(self.forms.custom_emoji.as_str());
        match self.backend.vocabulary_service.add_custom(kind, &self.forms.custom_label, emoji) {
            Ok(entry) => {
                self.success_message = Some(format!("Added {} \"{}\"", kind, entry.label));
                self.forms.custom_label.clear();
                self.forms.custom_emoji.clear();
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }

    pub fn remove_custom_tag(&mut self, kind: VocabularyKind, label: &str) {
        match self.backend.vocabulary_service.remove_custom(kind, label) {
            Ok(true) => self.success_message = Some(format!("Removed {} \"{}\"", kind, label)),
            Ok(false) => {}
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }

    pub fn toggle_premium(&mut self) {
        if let Err(e) = self.backend.set_premium(!self.is_premium) {
            self.error_message = Some(e.to_string());
        }
        self.refresh();
    }

    pub fn export_store(&mut self) {
        match self.backend.export_service.export_json() {
            Ok(json) => self.export_json = Some(json),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    pub fn import_store(&mut self) {
        match self.backend.export_service.import_json(&self.forms.import_json) {
            Ok(summary) => {
                self.success_message = Some(format!(
                    "Imported {} pets and {} check-ins",
                    summary.pets, summary.check_ins
                ));
                self.forms.import_json.clear();
                self.draft = CheckInDraft::default();
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
        self.refresh();
    }
}
