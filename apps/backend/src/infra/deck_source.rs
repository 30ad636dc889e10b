//! Where canonical ruleset sources come from.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::RulesetType;
use crate::errors::domain::{DomainError, InfraErrorKind};

const EMBEDDED_BASE: &str = include_str!("../../rulesets/base.json");

/// Supplies the raw canonical source text for a ruleset.
#[async_trait]
pub trait DeckSource: Send + Sync {
    /// Raw JSON for `ruleset`. Unreadable sources fail with
    /// `InfraErrorKind::DeckSourceUnavailable`.
    async fn read(&self, ruleset: RulesetType) -> Result<String, DomainError>;

    /// Rulesets this source can serve.
    async fn available(&self) -> Vec<RulesetType>;

    fn describe(&self) -> String;
}

fn unavailable(ruleset: RulesetType, why: impl std::fmt::Display) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DeckSourceUnavailable,
        format!("Cannot read {ruleset} ruleset source: {why}"),
    )
}

/// Sources compiled into the binary.
#[derive(Debug, Default)]
pub struct EmbeddedDeckSource;

#[async_trait]
impl DeckSource for EmbeddedDeckSource {
    async fn read(&self, ruleset: RulesetType) -> Result<String, DomainError> {
        match ruleset {
            RulesetType::Base => Ok(EMBEDDED_BASE.to_string()),
            other => Err(unavailable(other, "not embedded in this build")),
        }
    }

    async fn available(&self) -> Vec<RulesetType> {
        vec![RulesetType::Base]
    }

    fn describe(&self) -> String {
        "embedded".to_string()
    }
}

/// `<dir>/<code>.json` files, e.g. `decks/faf.json`.
#[derive(Debug, Clone)]
pub struct DirectoryDeckSource {
    dir: PathBuf,
}

impl DirectoryDeckSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, ruleset: RulesetType) -> PathBuf {
        self.dir.join(format!("{}.json", ruleset.code()))
    }
}

#[async_trait]
impl DeckSource for DirectoryDeckSource {
    async fn read(&self, ruleset: RulesetType) -> Result<String, DomainError> {
        let path = self.path_for(ruleset);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| unavailable(ruleset, format!("{}: {e}", path.display())))
    }

    async fn available(&self) -> Vec<RulesetType> {
        let mut found = Vec::new();
        for ruleset in RulesetType::ALL {
            if tokio::fs::try_exists(self.path_for(ruleset))
                .await
                .unwrap_or(false)
            {
                found.push(ruleset);
            }
        }
        found
    }

    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}

/// In-memory sources, mostly for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct InlineDeckSource {
    sources: HashMap<RulesetType, String>,
}

impl InlineDeckSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ruleset: RulesetType, raw: impl Into<String>) -> Self {
        self.sources.insert(ruleset, raw.into());
        self
    }
}

#[async_trait]
impl DeckSource for InlineDeckSource {
    async fn read(&self, ruleset: RulesetType) -> Result<String, DomainError> {
        self.sources
            .get(&ruleset)
            .cloned()
            .ok_or_else(|| unavailable(ruleset, "no inline source registered"))
    }

    async fn available(&self) -> Vec<RulesetType> {
        let mut found: Vec<RulesetType> = self.sources.keys().copied().collect();
        found.sort();
        found
    }

    fn describe(&self) -> String {
        "inline".to_string()
    }
}
