//! # UI State Module
//!
//! Plain state structs the screens edit before anything reaches the backend.

pub mod check_in_draft;

pub use check_in_draft::CheckInDraft;
