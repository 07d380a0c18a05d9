//! # Protocol Ring Module
//!
//! Donut-style progress ring for the running observation protocol, showing
//! "Day X of Y" in the middle. The ratio comes straight from the backend's
//! `ProtocolProgress`; this module only draws it.

pub mod renderer;

pub use renderer::{ProtocolRing, ProtocolRingConfig};
