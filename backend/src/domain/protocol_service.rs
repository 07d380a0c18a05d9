use chrono::Utc;
use log::info;
use shared::ActiveProtocol;
use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::domain::validation::required_text;
use crate::error::{StoreError, StoreResult};
use crate::storage::memory::{MemoryConnection, ProtocolRepository};
use crate::storage::traits::ProtocolStorage;

const MAX_PROTOCOL_NAME_LENGTH: usize = 100;

/// Service for the single running observation protocol
#[derive(Clone)]
pub struct ProtocolService {
    protocol_repository: ProtocolRepository,
    protocol_length_days: u32,
}

impl ProtocolService {
    pub fn new(connection: Arc<MemoryConnection>, config: &TrackerConfig) -> Self {
        Self {
            protocol_repository: ProtocolRepository::new(connection),
            protocol_length_days: config.protocol_length_days.max(1),
        }
    }

    pub fn get_active_protocol(&self) -> StoreResult<Option<ActiveProtocol>> {
        Ok(self.protocol_repository.get_protocol()?)
    }

    /// Start a protocol on day 1. A protocol that is already running is replaced.
    pub fn start_protocol(&self, name: &str) -> StoreResult<ActiveProtocol> {
        let name = required_text("Protocol name", name, MAX_PROTOCOL_NAME_LENGTH)?;
        let protocol = ActiveProtocol {
            name,
            current_day: 1,
            total_days: self.protocol_length_days,
            started_at: Utc::now(),
        };

        let previous = self.protocol_repository.replace_protocol(Some(protocol.clone()))?;
        if let Some(previous) = previous {
            info!("Replaced running protocol {} (day {}/{})", previous.name, previous.current_day, previous.total_days);
        }
        info!("Started protocol {} for {} days", protocol.name, protocol.total_days);
        Ok(protocol)
    }

    /// Stop the running protocol, if any
    pub fn cancel_protocol(&self) -> StoreResult<Option<ActiveProtocol>> {
        let cancelled = self.protocol_repository.replace_protocol(None)?;
        match &cancelled {
            Some(protocol) => info!("Cancelled protocol {} on day {}", protocol.name, protocol.current_day),
            None => info!("Cancel requested with no protocol running"),
        }
        Ok(cancelled)
    }

    /// Finish the running protocol and clear the slot
    pub fn complete_protocol(&self) -> StoreResult<ActiveProtocol> {
        let completed = self
            .protocol_repository
            .replace_protocol(None)?
            .ok_or(StoreError::NoActiveProtocol)?;
        info!("Completed protocol {} on day {}/{}", completed.name, completed.current_day, completed.total_days);
        Ok(completed)
    }

    /// Move to the next day. The day never passes `total_days`.
    pub fn advance_protocol_day(&self) -> StoreResult<ActiveProtocol> {
        let protocol = self
            .protocol_repository
            .modify_protocol(|protocol| {
                protocol.current_day = protocol.current_day.saturating_add(1).clamp(1, protocol.total_days.max(1));
            })?
            .ok_or(StoreError::NoActiveProtocol)?;

        info!("Protocol {} now on day {}/{}", protocol.name, protocol.current_day, protocol.total_days);
        Ok(protocol)
    }
}
