//! `ActionLog` kept in process memory.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::SessionId;
use crate::errors::domain::DomainError;
use crate::repos::{ActionLog, LogEntry};

#[derive(Debug, Default)]
pub struct InMemoryActionLog {
    entries: RwLock<HashMap<SessionId, Vec<LogEntry>>>,
}

impl InMemoryActionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActionLog for InMemoryActionLog {
    async fn append(&self, entries: Vec<LogEntry>) -> Result<(), DomainError> {
        let mut guard = self.entries.write();
        for entry in entries {
            guard.entry(entry.session_id).or_default().push(entry);
        }
        Ok(())
    }

    async fn entries(&self, session_id: SessionId) -> Result<Vec<LogEntry>, DomainError> {
        Ok(self
            .entries
            .read()
            .get(&session_id)
            .cloned()
            .unwrap_or_default())
    }
}
