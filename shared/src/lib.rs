use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Top of the itch scale; levels run from 0 to this value inclusive
pub const MAX_ITCH_LEVEL: u8 = 10;

/// Species of a tracked pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Dog,
    Cat,
}

/// Where the pet spends most of its time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetEnvironment {
    Indoor,
    Outdoor,
    Both,
}

/// Optional baseline answers collected when a pet is added
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetBaseline {
    pub flea_prevention: Option<bool>,
    pub hypoallergenic_diet: Option<bool>,
    /// Body areas the owner already knows to be itchy
    #[serde(default)]
    pub itch_areas: BTreeSet<String>,
}

/// Pet ID in format: "pet::epoch_millis_sequence"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub species: Species,
    pub breed: String,
    /// Free text, e.g. "3 years" or "8 months"
    pub age: String,
    pub environment: PetEnvironment,
    /// Reference to an avatar image, owned by the UI
    pub avatar: Option<String>,
    /// At most one pet is active; if any pet exists exactly one is
    pub active: bool,
    #[serde(default)]
    pub baseline: PetBaseline,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A routine daily symptom log for one pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: String,
    pub pet_id: String,
    /// Moment of the check-in (RFC 3339 on the wire)
    pub date: DateTime<Utc>,
    /// Itch level on the 0-10 scale
    pub itch_level: u8,
    pub selected_parts: BTreeSet<String>,
    pub skin_signs: BTreeSet<String>,
    pub exposures: BTreeSet<String>,
    pub notes: Option<String>,
    pub image_uri: Option<String>,
    pub video_uri: Option<String>,
    pub audio_uri: Option<String>,
}

/// An unscheduled, acute symptom event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flare {
    pub id: String,
    pub pet_id: String,
    pub date: DateTime<Utc>,
    pub itch_level: u8,
    pub triggers: BTreeSet<String>,
    pub notes: Option<String>,
    pub image_uri: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Photo => write!(f, "photo"),
            MediaType::Video => write!(f, "video"),
        }
    }
}

/// A photo or video attached to a pet's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: String,
    pub pet_id: String,
    pub date: DateTime<Utc>,
    pub media_type: MediaType,
    pub uri: String,
    /// Body area the media shows
    pub area: Option<String>,
    pub notes: Option<String>,
    /// Weak back-reference to the check-in this media was captured with.
    /// Deleting the check-in leaves the media in place.
    pub check_in_id: Option<String>,
}

/// The observation protocol currently running, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveProtocol {
    pub name: String,
    /// 1-based, always within `1..=total_days`
    pub current_day: u32,
    pub total_days: u32,
    pub started_at: DateTime<Utc>,
}

/// Icon shown next to a vocabulary label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagIcon {
    /// Identifier of a bundled icon
    FixedIcon(String),
    /// Free-text emoji typed by the user
    CustomEmoji(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VocabularyKind {
    BodyPart,
    SkinSign,
    Exposure,
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabularyKind::BodyPart => write!(f, "body part"),
            VocabularyKind::SkinSign => write!(f, "skin sign"),
            VocabularyKind::Exposure => write!(f, "exposure"),
        }
    }
}

/// A selectable label in one of the check-in vocabularies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub label: String,
    pub icon: Option<TagIcon>,
    /// Default entries ship with the app and can never be removed
    pub is_default: bool,
}

/// Average itch for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyItch {
    pub date: NaiveDate,
    pub check_in_count: usize,
    /// None when nothing was logged that day
    pub average_itch: Option<f32>,
}

/// Aggregates over the trailing window of days ending today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// Oldest day first
    pub days: Vec<DailyItch>,
    pub average_itch: Option<f32>,
    pub check_in_count: usize,
    pub flare_count: usize,
}

/// Completion of the active protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolProgress {
    pub name: String,
    pub current_day: u32,
    pub total_days: u32,
    /// current_day / total_days, clamped to 0.0..=1.0
    pub ratio: f32,
}

impl ProtocolProgress {
    /// Text for the centre of the progress ring
    pub fn label(&self) -> String {
        format!("Day {} of {}", self.current_day, self.total_days)
    }
}
