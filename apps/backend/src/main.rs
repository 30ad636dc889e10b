use pbf_backend::config::EngineConfig;
use pbf_backend::infra::state::build_state;
use tracing::{error, info};

mod telemetry;

/// Startup check: read configuration, load every ruleset the configured deck
/// source serves and report. Exits non-zero when a source is unreadable or
/// malformed.
#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, code = %e.code(), "invalid engine configuration");
            std::process::exit(2);
        }
    };
    info!(
        lock_timeout_ms = config.lock_timeout.as_millis(),
        save_retries = config.save_retries,
        deck_dir = ?config.deck_dir,
        fixed_seed = config.rng_seed.is_some(),
        "engine configuration loaded"
    );

    let state = match build_state().with_config(config).with_preload().build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, code = %e.code(), "failed to build engine state");
            std::process::exit(1);
        }
    };

    info!(
        cached_rulesets = state.catalog.cached().await,
        source = %state.catalog.source_description(),
        "session engine ready"
    );
}
