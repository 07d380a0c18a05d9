//! # UI Components Module
//!
//! ## Module Organization:
//! - `data_loading` - Backend calls behind every user action, plus refresh
//! - `itch_slider` - Gesture-driven 0-10 itch input
//! - `protocol_ring` - Donut progress for the running protocol
//! - `weekly_chart` - Per-day average itch bars
//! - `styling` - Global style and color palette

pub mod data_loading;
pub mod itch_slider;
pub mod protocol_ring;
pub mod styling;
pub mod weekly_chart;

pub use styling::setup_tracker_style;
