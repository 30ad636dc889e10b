use std::sync::Arc;

use tracing::info;

use crate::adapters::{InMemoryActionLog, InMemorySessionStore};
use crate::config::EngineConfig;
use crate::domain::{EntropySeedSource, FixedSeedSource, SeedSource};
use crate::error::AppError;
use crate::infra::deck_source::{DeckSource, DirectoryDeckSource, EmbeddedDeckSource};
use crate::infra::notify::{Notifier, TracingNotifier};
use crate::repos::{ActionLog, SessionStore};
use crate::services::deck_catalog::DeckCatalog;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: EngineConfig,
    store: Option<Arc<dyn SessionStore>>,
    action_log: Option<Arc<dyn ActionLog>>,
    notifier: Option<Arc<dyn Notifier>>,
    deck_source: Option<Arc<dyn DeckSource>>,
    seeds: Option<Arc<dyn SeedSource>>,
    preload: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            store: None,
            action_log: None,
            notifier: None,
            deck_source: None,
            seeds: None,
            preload: false,
        }
    }
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }
    pub fn with_action_log(mut self, action_log: Arc<dyn ActionLog>) -> Self {
        self.action_log = Some(action_log);
        self
    }
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }
    pub fn with_deck_source(mut self, source: Arc<dyn DeckSource>) -> Self {
        self.deck_source = Some(source);
        self
    }
    pub fn with_seed_source(mut self, seeds: Arc<dyn SeedSource>) -> Self {
        self.seeds = Some(seeds);
        self
    }
    /// Parse every ruleset the deck source serves before returning.
    pub fn with_preload(mut self) -> Self {
        self.preload = true;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let config = self.config;

        let deck_source: Arc<dyn DeckSource> = match (self.deck_source, &config.deck_dir) {
            (Some(source), _) => source,
            (None, Some(dir)) => Arc::new(DirectoryDeckSource::new(dir.clone())),
            (None, None) => Arc::new(EmbeddedDeckSource),
        };
        let seeds: Arc<dyn SeedSource> = match (self.seeds, config.rng_seed) {
            (Some(seeds), _) => seeds,
            (None, Some(base)) => Arc::new(FixedSeedSource::new(base)),
            (None, None) => Arc::new(EntropySeedSource),
        };

        let catalog = Arc::new(DeckCatalog::new(deck_source));
        if self.preload {
            let loaded = catalog.preload().await?;
            info!(rulesets = ?loaded, source = %catalog.source_description(), "ruleset sources preloaded");
        }

        Ok(AppState::new(
            self.store
                .unwrap_or_else(|| Arc::new(InMemorySessionStore::new())),
            self.action_log
                .unwrap_or_else(|| Arc::new(InMemoryActionLog::new())),
            self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
            catalog,
            seeds,
            config,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
