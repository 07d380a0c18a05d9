use anyhow::Result;
use shared::ActiveProtocol;
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::storage::traits::ProtocolStorage;

/// Single slot holding the running protocol
#[derive(Clone)]
pub struct ProtocolRepository {
    connection: Arc<MemoryConnection>,
}

impl ProtocolRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl ProtocolStorage for ProtocolRepository {
    fn get_protocol(&self) -> Result<Option<ActiveProtocol>> {
        Ok(self.connection.read(|state| state.protocol.clone()))
    }

    fn replace_protocol(&self, protocol: Option<ActiveProtocol>) -> Result<Option<ActiveProtocol>> {
        self.connection
            .mutate(|state| std::mem::replace(&mut state.protocol, protocol))
    }

    fn modify_protocol<F>(&self, edit: F) -> Result<Option<ActiveProtocol>>
    where
        F: FnOnce(&mut ActiveProtocol),
    {
        self.connection.mutate(|state| {
            let protocol = state.protocol.as_mut()?;
            edit(protocol);
            Some(protocol.clone())
        })
    }
}
