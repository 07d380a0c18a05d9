//! # Storage Module
//!
//! Repository traits, the in-memory implementation, and the versioned
//! snapshot format that crosses the storage boundary.

pub mod memory;
pub mod snapshot;
pub mod traits;

pub use memory::*;
pub use snapshot::{CustomVocabulary, StoreSnapshot, SNAPSHOT_VERSION};
pub use traits::*;
