//! # UI Module
//!
//! Everything drawn in the tracker window.
//!
//! - `app_state` - `PetItchApp`, the single owner of UI state and the backend
//! - `app_implementation` - `eframe::App` impl and screen layout
//! - `state` - Drafts edited by forms before they are saved
//! - `components` - Reusable widgets and the backend bridge

pub mod app_implementation;
pub mod app_state;
pub mod components;
pub mod state;

pub use app_state::PetItchApp;
