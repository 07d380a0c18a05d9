//! # Itch Slider Module
//!
//! A 0-10 integer input driven by drag and tap gestures. The thumb follows the
//! pointer continuously while the committed integer only changes when the
//! rounded value does.
//!
//! ## Key Components:
//! - `track.rs` - Pure gesture model: pointer x to position to discrete value
//! - `spring.rs` - Damped spring used for tap and external-value transitions
//! - `handoff.rs` - Bounded channel carrying value commits to the form owner
//! - `widget.rs` - egui widget wiring pointer input and painting to the model
//!
//! ## Threading:
//! Commits never touch form or store state directly. The gesture side sends
//! them over `commit_channel` and the owner drains the receiver on its own frame.

pub mod handoff;
pub mod spring;
pub mod track;
pub mod widget;

use serde::{Deserialize, Serialize};

pub use handoff::{commit_channel, ValueCommitReceiver, ValueCommitSender};
pub use spring::{Spring, SpringConfig};
pub use track::SliderTrack;
pub use widget::ItchSlider;

/// Tunables for the slider, usually read from the app config file.
/// The scale itself is fixed at `0..=MAX_ITCH_LEVEL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItchSliderConfig {
    pub spring: SpringConfig,
    /// Commits buffered between the gesture side and the form owner
    pub commit_channel_capacity: usize,
    pub track_height: f32,
    pub thumb_radius: f32,
}

impl Default for ItchSliderConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            commit_channel_capacity: 16,
            track_height: 8.0,
            thumb_radius: 12.0,
        }
    }
}
