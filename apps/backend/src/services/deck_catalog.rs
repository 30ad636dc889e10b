//! Canonical deck cache and per-session deck construction.

use std::sync::Arc;

use moka::future::Cache;
use tracing::{debug, info};

use crate::domain::{CanonicalDeck, DeckSet, RulesetType};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::infra::deck_source::DeckSource;

/// Parses canonical sources once per ruleset and hands out independently
/// shuffled copies. Evicting a source never touches sessions built from it.
pub struct DeckCatalog {
    source: Arc<dyn DeckSource>,
    cache: Cache<RulesetType, Arc<CanonicalDeck>>,
}

fn build_cache() -> Cache<RulesetType, Arc<CanonicalDeck>> {
    // One slot per distinct ruleset type.
    Cache::builder()
        .max_capacity(RulesetType::ALL.len() as u64)
        .eviction_listener(|ruleset: Arc<RulesetType>, _deck, cause| {
            debug!(ruleset = %ruleset, cause = ?cause, "canonical deck evicted");
        })
        .build()
}

impl DeckCatalog {
    pub fn new(source: Arc<dyn DeckSource>) -> Self {
        Self {
            source,
            cache: build_cache(),
        }
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Parsed canonical deck for `ruleset`, reading the source on first use.
    /// Concurrent first calls share one read.
    pub async fn canonical(&self, ruleset: RulesetType) -> Result<Arc<CanonicalDeck>, AppError> {
        let source = Arc::clone(&self.source);
        self.cache
            .try_get_with(ruleset, async move {
                let raw = source.read(ruleset).await?;
                let deck = CanonicalDeck::from_json(ruleset, &raw)?;
                info!(
                    ruleset = %ruleset,
                    categories = deck.categories.len(),
                    "canonical deck loaded"
                );
                Ok::<_, DomainError>(Arc::new(deck))
            })
            .await
            .map_err(|e: Arc<DomainError>| AppError::from((*e).clone()))
    }

    /// A freshly shuffled deck set for a new session.
    pub async fn build_deck_set(&self, ruleset: RulesetType, seed: u64) -> Result<DeckSet, AppError> {
        let canonical = self.canonical(ruleset).await?;
        Ok(DeckSet::build(&canonical, seed))
    }

    /// Like [`DeckCatalog::build_deck_set`], parsing the ruleset code first.
    pub async fn build_deck_set_for_code(&self, code: &str, seed: u64) -> Result<DeckSet, AppError> {
        let ruleset = RulesetType::parse(code)?;
        self.build_deck_set(ruleset, seed).await
    }

    /// Load every ruleset the source serves.
    pub async fn preload(&self) -> Result<Vec<RulesetType>, AppError> {
        let available = self.source.available().await;
        for ruleset in &available {
            self.canonical(*ruleset).await?;
        }
        Ok(available)
    }

    pub async fn invalidate(&self, ruleset: RulesetType) {
        self.cache.invalidate(&ruleset).await;
    }

    pub async fn cached(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}
