//! # App State Module
//!
//! Central state of the tracker window.
//!
//! Everything shown on screen is a copy loaded from the backend by
//! `refresh()`. Screens never edit those copies; they call a backend
//! operation and refresh, so every view reflects the same committed state.

use log::info;
use pet_itch_tracker_backend::Backend;
use shared::{CheckIn, Pet, ProtocolProgress, Species, VocabularyEntry, WeeklySummary};

use crate::config::AppConfig;
use crate::ui::components::itch_slider::{commit_channel, ValueCommitReceiver, ValueCommitSender};
use crate::ui::state::CheckInDraft;

/// Inputs of the small forms around the dashboard
#[derive(Debug, Clone)]
pub struct FormState {
    pub new_pet_name: String,
    pub new_pet_species: Species,
    pub new_protocol_name: String,
    pub custom_label: String,
    pub custom_emoji: String,
    pub import_json: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            new_pet_name: String::new(),
            new_pet_species: Species::Dog,
            new_protocol_name: String::new(),
            custom_label: String::new(),
            custom_emoji: String::new(),
            import_json: String::new(),
        }
    }
}

/// Vocabulary lists as shown on the check-in card
#[derive(Debug, Clone, Default)]
pub struct VocabularyLists {
    pub body_parts: Vec<VocabularyEntry>,
    pub skin_signs: Vec<VocabularyEntry>,
    pub exposures: Vec<VocabularyEntry>,
}

/// Main application struct for the egui tracker
pub struct PetItchApp {
    pub backend: Backend,
    pub config: AppConfig,

    // Loaded from the backend
    pub pets: Vec<Pet>,
    pub active_pet: Option<Pet>,
    pub recent_check_ins: Vec<CheckIn>,
    pub streak: u32,
    pub checked_in_today: bool,
    pub weekly_summary: Option<WeeklySummary>,
    pub protocol: Option<ProtocolProgress>,
    pub vocabulary: VocabularyLists,
    pub is_premium: bool,

    // Check-in card
    pub draft: CheckInDraft,
    pub itch_commits: ValueCommitSender,
    pub itch_updates: ValueCommitReceiver,

    pub forms: FormState,
    pub export_json: Option<String>,

    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl PetItchApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        crate::ui::components::setup_tracker_style(&cc.egui_ctx);
        Self::with_config(config)
    }

    /// App over a fresh session store, without a window
    pub fn with_config(config: AppConfig) -> Self {
        info!("Initializing PetItchApp");

        let backend = Backend::new(&config.tracker);
        let (itch_commits, itch_updates) = commit_channel(config.slider.commit_channel_capacity);

        let mut app = Self {
            backend,
            config,
            pets: Vec::new(),
            active_pet: None,
            recent_check_ins: Vec::new(),
            streak: 0,
            checked_in_today: false,
            weekly_summary: None,
            protocol: None,
            vocabulary: VocabularyLists::default(),
            is_premium: false,
            draft: CheckInDraft::default(),
            itch_commits,
            itch_updates,
            forms: FormState::default(),
            export_json: None,
            error_message: None,
            success_message: None,
        };
        app.refresh();
        app
    }

    /// Clear any error or success messages
    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }
}
