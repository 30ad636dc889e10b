use std::sync::Arc;

use crate::config::EngineConfig;
use crate::domain::SeedSource;
use crate::infra::locks::SessionLocks;
use crate::infra::notify::Notifier;
use crate::repos::{ActionLog, SessionStore};
use crate::services::deck_catalog::DeckCatalog;

/// Application state containing shared resources. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Session snapshots
    pub store: Arc<dyn SessionStore>,
    /// Public and private action log sink
    pub action_log: Arc<dyn ActionLog>,
    pub notifier: Arc<dyn Notifier>,
    /// Cached canonical decks per ruleset
    pub catalog: Arc<DeckCatalog>,
    pub locks: Arc<SessionLocks>,
    /// Base seeds for new sessions
    pub seeds: Arc<dyn SeedSource>,
    pub config: EngineConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SessionStore>,
        action_log: Arc<dyn ActionLog>,
        notifier: Arc<dyn Notifier>,
        catalog: Arc<DeckCatalog>,
        seeds: Arc<dyn SeedSource>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            action_log,
            notifier,
            catalog,
            locks: Arc::new(SessionLocks::new(config.lock_timeout)),
            seeds,
            config,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("locked_sessions", &self.locks.tracked())
            .finish_non_exhaustive()
    }
}
