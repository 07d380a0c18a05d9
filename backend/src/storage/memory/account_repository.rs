use anyhow::Result;
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::storage::traits::AccountStorage;

#[derive(Clone)]
pub struct AccountRepository {
    connection: Arc<MemoryConnection>,
}

impl AccountRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl AccountStorage for AccountRepository {
    fn is_premium(&self) -> Result<bool> {
        Ok(self.connection.read(|state| state.is_premium))
    }

    fn set_premium(&self, is_premium: bool) -> Result<()> {
        self.connection.mutate(|state| state.is_premium = is_premium)
    }
}
