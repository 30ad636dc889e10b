//! `SessionStore` backed by concurrent maps.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::{DrawId, Session, SessionId, SessionStatus};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::SessionStore;

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, Session>,
    draw_index: DashMap<DrawId, SessionId>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn index_draws(&self, session: &Session) {
        for draw in &session.draws {
            self.draw_index.entry(draw.id).or_insert(session.id);
        }
    }
}

fn session_not_found(id: SessionId) -> DomainError {
    DomainError::not_found(NotFoundKind::Session, format!("Session {id} not found"))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, mut session: Session) -> Result<Session, DomainError> {
        match self.sessions.entry(session.id) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::SessionExists,
                format!("Session {} already exists", session.id),
            )),
            Entry::Vacant(slot) => {
                session.version = 1;
                slot.insert(session.clone());
                self.index_draws(&session);
                Ok(session)
            }
        }
    }

    async fn load(&self, id: SessionId) -> Result<Session, DomainError> {
        self.sessions
            .get(&id)
            .map(|s| s.value().clone())
            .ok_or_else(|| session_not_found(id))
    }

    async fn save(&self, mut session: Session, expected_version: u64) -> Result<Session, DomainError> {
        let id = session.id;
        {
            let mut stored = self.sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
            if stored.version != expected_version {
                debug!(
                    session_id = %id,
                    expected = expected_version,
                    actual = stored.version,
                    "stale session save rejected"
                );
                return Err(DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Session {id} is at version {}, expected {expected_version}",
                        stored.version
                    ),
                ));
            }
            session.version = expected_version + 1;
            *stored = session.clone();
        }
        self.index_draws(&session);
        Ok(session)
    }

    async fn list(&self, status: Option<SessionStatus>) -> Result<Vec<Session>, DomainError> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .filter(|s| status.map_or(true, |wanted| s.status == wanted))
            .map(|s| s.value().clone())
            .collect();
        sessions.sort_by_key(|s| (s.created_at, s.id));
        Ok(sessions)
    }

    async fn locate_draw(&self, draw_id: DrawId) -> Result<SessionId, DomainError> {
        self.draw_index
            .get(&draw_id)
            .map(|id| *id.value())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Draw, format!("Draw {draw_id} not found")))
    }
}
