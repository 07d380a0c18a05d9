//! Domain-level command types.
//!
//! Drafts carry everything a screen collects before saving; update commands
//! carry only the fields being changed. `None` means "leave as is"; for
//! optional fields `Some(None)` clears the value.

pub mod pets {
    use shared::{PetBaseline, PetEnvironment, Species};

    /// Input for adding a new pet
    #[derive(Debug, Clone)]
    pub struct AddPetCommand {
        pub name: String,
        pub species: Species,
        pub breed: String,
        pub age: String,
        pub environment: PetEnvironment,
        pub avatar: Option<String>,
        pub baseline: PetBaseline,
    }

    /// Partial update of a pet. Activation is changed only through `set_active_pet`.
    #[derive(Debug, Clone, Default)]
    pub struct UpdatePetCommand {
        pub pet_id: String,
        pub name: Option<String>,
        pub species: Option<Species>,
        pub breed: Option<String>,
        pub age: Option<String>,
        pub environment: Option<PetEnvironment>,
        pub avatar: Option<Option<String>>,
        pub baseline: Option<PetBaseline>,
    }
}

pub mod check_ins {
    use chrono::{DateTime, Utc};
    use std::collections::BTreeSet;

    /// Input for saving the daily check-in form
    #[derive(Debug, Clone, Default)]
    pub struct AddCheckInCommand {
        /// Defaults to the active pet
        pub pet_id: Option<String>,
        /// Defaults to now
        pub date: Option<DateTime<Utc>>,
        pub itch_level: u8,
        pub selected_parts: BTreeSet<String>,
        pub skin_signs: BTreeSet<String>,
        pub exposures: BTreeSet<String>,
        pub notes: Option<String>,
        /// A photo URI also creates a photo Media row pointing back at the check-in
        pub image_uri: Option<String>,
        /// A video URI also creates a video Media row pointing back at the check-in
        pub video_uri: Option<String>,
        pub audio_uri: Option<String>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateCheckInCommand {
        pub check_in_id: String,
        pub date: Option<DateTime<Utc>>,
        pub itch_level: Option<u8>,
        pub selected_parts: Option<BTreeSet<String>>,
        pub skin_signs: Option<BTreeSet<String>>,
        pub exposures: Option<BTreeSet<String>>,
        pub notes: Option<Option<String>>,
        pub image_uri: Option<Option<String>>,
        pub video_uri: Option<Option<String>>,
        pub audio_uri: Option<Option<String>>,
    }
}

pub mod flares {
    use chrono::{DateTime, Utc};
    use std::collections::BTreeSet;

    #[derive(Debug, Clone, Default)]
    pub struct AddFlareCommand {
        /// Defaults to the active pet
        pub pet_id: Option<String>,
        /// Defaults to now
        pub date: Option<DateTime<Utc>>,
        pub itch_level: u8,
        pub triggers: BTreeSet<String>,
        pub notes: Option<String>,
        pub image_uri: Option<String>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateFlareCommand {
        pub flare_id: String,
        pub date: Option<DateTime<Utc>>,
        pub itch_level: Option<u8>,
        pub triggers: Option<BTreeSet<String>>,
        pub notes: Option<Option<String>>,
        pub image_uri: Option<Option<String>>,
    }
}

pub mod media {
    use chrono::{DateTime, Utc};
    use shared::MediaType;

    #[derive(Debug, Clone)]
    pub struct AddMediaCommand {
        /// Defaults to the active pet
        pub pet_id: Option<String>,
        /// Defaults to now
        pub date: Option<DateTime<Utc>>,
        pub media_type: MediaType,
        pub uri: String,
        pub area: Option<String>,
        pub notes: Option<String>,
        pub check_in_id: Option<String>,
    }
}
