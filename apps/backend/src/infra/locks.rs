//! Per-session write locks with bounded acquisition.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::domain::SessionId;
use crate::errors::domain::{ConflictKind, DomainError};

/// One mutex per session id. Sessions never share a lock, and no caller
/// holds more than one at a time.
#[derive(Debug)]
pub struct SessionLocks {
    locks: DashMap<SessionId, Arc<Mutex<()>>>,
    timeout: Duration,
}

/// Held for the duration of one mutation; releases on drop.
#[derive(Debug)]
pub struct SessionGuard {
    session_id: SessionId,
    _guard: OwnedMutexGuard<()>,
}

impl SessionGuard {
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }
}

impl SessionLocks {
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn lock_for(&self, session_id: SessionId) -> Arc<Mutex<()>> {
        self.locks
            .entry(session_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Wait up to the configured timeout for exclusive access to `session_id`.
    pub async fn acquire(&self, session_id: SessionId) -> Result<SessionGuard, DomainError> {
        let lock = self.lock_for(session_id);
        let wait_start = Instant::now();
        match tokio::time::timeout(self.timeout, lock.lock_owned()).await {
            Ok(guard) => {
                let wait_ms = wait_start.elapsed().as_millis();
                if wait_ms > 0 {
                    debug!(session_id = %session_id, wait_ms, "waited for session lock");
                }
                Ok(SessionGuard {
                    session_id,
                    _guard: guard,
                })
            }
            Err(_) => {
                warn!(
                    session_id = %session_id,
                    timeout_ms = self.timeout.as_millis(),
                    "session lock timed out"
                );
                Err(DomainError::conflict(
                    ConflictKind::LockTimeout,
                    format!("Session {session_id} is busy, try again"),
                ))
            }
        }
    }

    /// Release `guard` and drop the session's entry, unless another caller
    /// already holds a handle to the same mutex. Used once a session can no
    /// longer change status.
    pub fn retire(&self, guard: SessionGuard) {
        let session_id = guard.session_id;
        // Map entry plus the one inside `guard`.
        let removed = self
            .locks
            .remove_if(&session_id, |_, lock| Arc::strong_count(lock) == 2)
            .is_some();
        drop(guard);
        debug!(session_id = %session_id, removed, "session lock retired");
    }

    /// Number of sessions with a live lock entry.
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}
