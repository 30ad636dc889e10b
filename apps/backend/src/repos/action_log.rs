//! Append-only action log contract.

use std::fmt::{Display, Formatter, Result as FmtResult};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::{DrawId, LogEntryId, SessionId};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "username")]
pub enum Visibility {
    Public,
    /// Only the named player sees this entry.
    PrivateTo(String),
}

impl Visibility {
    pub fn visible_to(&self, username: &str) -> bool {
        match self {
            Visibility::Public => true,
            Visibility::PrivateTo(owner) => owner == username,
        }
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Visibility::Public => f.write_str("public"),
            Visibility::PrivateTo(user) => write!(f, "private:{user}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,
    pub session_id: SessionId,
    pub visibility: Visibility,
    pub text: String,
    pub timestamp: OffsetDateTime,
    pub related_draw: Option<DrawId>,
}

impl LogEntry {
    pub fn public(session_id: SessionId, text: impl Into<String>, at: OffsetDateTime) -> Self {
        Self {
            id: LogEntryId::new(),
            session_id,
            visibility: Visibility::Public,
            text: text.into(),
            timestamp: at,
            related_draw: None,
        }
    }

    pub fn private(
        session_id: SessionId,
        username: impl Into<String>,
        text: impl Into<String>,
        at: OffsetDateTime,
    ) -> Self {
        Self {
            visibility: Visibility::PrivateTo(username.into()),
            ..Self::public(session_id, text, at)
        }
    }

    pub fn with_draw(mut self, draw_id: DrawId) -> Self {
        self.related_draw = Some(draw_id);
        self
    }
}

/// Durable, append-only sink for log entries.
#[async_trait]
pub trait ActionLog: Send + Sync {
    async fn append(&self, entries: Vec<LogEntry>) -> Result<(), DomainError>;

    /// Entries of one session in append order.
    async fn entries(&self, session_id: SessionId) -> Result<Vec<LogEntry>, DomainError>;
}
