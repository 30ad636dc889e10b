//! Engine settings read from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

pub const LOCK_TIMEOUT_VAR: &str = "PBF_LOCK_TIMEOUT_MS";
pub const SAVE_RETRIES_VAR: &str = "PBF_SAVE_RETRIES";
pub const LOG_APPEND_TIMEOUT_VAR: &str = "PBF_LOG_APPEND_TIMEOUT_MS";
pub const DECK_DIR_VAR: &str = "PBF_DECK_DIR";
pub const RNG_SEED_VAR: &str = "PBF_RNG_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Longest wait for a session's write lock.
    pub lock_timeout: Duration,
    /// Extra attempts after a stale-version save.
    pub save_retries: u32,
    /// Longest wait for the action log to accept entries.
    pub log_append_timeout: Duration,
    /// Directory of `<code>.json` ruleset sources; embedded decks when unset.
    pub deck_dir: Option<PathBuf>,
    /// Fixed base seed for new sessions; entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_millis(5000),
            save_retries: 3,
            log_append_timeout: Duration::from_millis(2000),
            deck_dir: None,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            lock_timeout: parse_var::<u64>(LOCK_TIMEOUT_VAR)?
                .map(Duration::from_millis)
                .unwrap_or(defaults.lock_timeout),
            save_retries: parse_var(SAVE_RETRIES_VAR)?.unwrap_or(defaults.save_retries),
            log_append_timeout: parse_var::<u64>(LOG_APPEND_TIMEOUT_VAR)?
                .map(Duration::from_millis)
                .unwrap_or(defaults.log_append_timeout),
            deck_dir: optional_var(DECK_DIR_VAR).map(PathBuf::from),
            rng_seed: parse_var(RNG_SEED_VAR)?,
        })
    }

    /// Short timeouts and a fixed seed.
    pub fn for_tests() -> Self {
        Self {
            lock_timeout: Duration::from_millis(250),
            save_retries: 3,
            log_append_timeout: Duration::from_millis(100),
            deck_dir: None,
            rng_seed: Some(0x5EED),
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    optional_var(name)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                AppError::config(format!("Environment variable '{name}' has invalid value '{raw}'"))
            })
        })
        .transpose()
}
