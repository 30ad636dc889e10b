use std::time::Instant;

use tracing::{debug, error, info, warn};

use super::log_render::render_events;
use super::SessionFlowService;
use crate::domain::{Session, SessionEvent, SessionEvents, SessionId, SessionStatus};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::LogEntry;

#[derive(Debug)]
pub struct MutationOutcome<T> {
    /// The session as saved, with its new version.
    pub session: Session,
    pub value: T,
    pub events: Vec<SessionEvent>,
    /// Save attempts used; more than one means version conflicts were retried.
    pub attempts: u32,
}

impl SessionFlowService {
    /// Run `apply` against the latest snapshot of `session_id` while holding
    /// the session's write lock.
    ///
    /// `apply` works on an owned copy; nothing is stored unless it succeeds
    /// and the result passes the invariant check. Stale saves reload and
    /// re-run `apply`, up to the configured retry count. Log entries are
    /// appended before the lock is released; turn notifications go out after.
    pub(super) async fn run_mutation<T, F>(
        &self,
        session_id: SessionId,
        operation: &'static str,
        mut apply: F,
    ) -> Result<MutationOutcome<T>, AppError>
    where
        F: FnMut(&mut Session, &mut SessionEvents) -> Result<T, DomainError>,
    {
        debug!(session_id = %session_id, operation, "mutation requested");
        let guard = self.state.locks.acquire(session_id).await?;
        let max_attempts = self.state.config.save_retries + 1;

        let mut attempts = 0;
        let (saved, value, events) = loop {
            attempts += 1;
            let mut working = self.state.store.load(session_id).await?;
            let expected_version = working.version;

            let mut events = SessionEvents::now();
            let value = apply(&mut working, &mut events)?;
            working.updated_at = events.at;

            if let Err(e) = working.check_invariants() {
                error!(session_id = %session_id, operation, error = %e, "invariant violated, mutation discarded");
                return Err(e.into());
            }

            match self.state.store.save(working, expected_version).await {
                Ok(saved) => break (saved, value, events.into_vec()),
                Err(DomainError::Conflict(ConflictKind::OptimisticLock, detail)) => {
                    if attempts >= max_attempts {
                        warn!(session_id = %session_id, operation, attempts, "save retries exhausted");
                        return Err(DomainError::conflict(
                            ConflictKind::RetriesExhausted,
                            format!("Session {session_id} kept changing underneath {operation}: {detail}"),
                        )
                        .into());
                    }
                    warn!(session_id = %session_id, operation, attempt = attempts, "version conflict, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        };

        info!(
            session_id = %session_id,
            operation,
            version = saved.version,
            attempts,
            events = events.len(),
            "mutation committed"
        );

        self.append_log(render_events(&saved, &events)).await;
        if saved.status == SessionStatus::Finished {
            self.state.locks.retire(guard);
        } else {
            drop(guard);
        }
        self.notify_turns(&saved, &events).await;

        Ok(MutationOutcome {
            session: saved,
            value,
            events,
            attempts,
        })
    }

    /// Append entries with a bounded wait. Failures are logged and absorbed.
    pub(super) async fn append_log(&self, entries: Vec<LogEntry>) {
        if entries.is_empty() {
            return;
        }
        let count = entries.len();
        let started = Instant::now();
        let timeout = self.state.config.log_append_timeout;
        match tokio::time::timeout(timeout, self.state.action_log.append(entries)).await {
            Ok(Ok(())) => {
                debug!(count, elapsed_ms = started.elapsed().as_millis(), "log entries appended");
            }
            Ok(Err(e)) => {
                warn!(count, error = %e, "action log append failed");
            }
            Err(_) => {
                warn!(count, timeout_ms = timeout.as_millis(), "action log append timed out");
            }
        }
    }

    /// One notification per turn advance.
    async fn notify_turns(&self, session: &Session, events: &[SessionEvent]) {
        for event in events {
            if let SessionEvent::Started { player, username }
            | SessionEvent::TurnPassed {
                player, username, ..
            } = event
            {
                self.state
                    .notifier
                    .notify(session.id, player, username)
                    .await;
            }
        }
    }
}
