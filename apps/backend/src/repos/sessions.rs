//! Session persistence contract.

use async_trait::async_trait;

use crate::domain::{DrawId, Session, SessionId, SessionStatus};
use crate::errors::domain::DomainError;

/// Snapshot persistence with an optimistic concurrency token.
///
/// Implementations bump `Session::version` on every successful save. A save
/// whose `expected_version` is stale fails with
/// `DomainError::Conflict(ConflictKind::OptimisticLock, _)`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a brand-new session at version 1.
    async fn insert(&self, session: Session) -> Result<Session, DomainError>;

    async fn load(&self, id: SessionId) -> Result<Session, DomainError>;

    /// Replace the stored snapshot if it is still at `expected_version`.
    /// Returns the saved session with its new version.
    async fn save(&self, session: Session, expected_version: u64) -> Result<Session, DomainError>;

    async fn list(&self, status: Option<SessionStatus>) -> Result<Vec<Session>, DomainError>;

    /// The session that owns a draw record.
    async fn locate_draw(&self, draw_id: DrawId) -> Result<SessionId, DomainError>;
}
