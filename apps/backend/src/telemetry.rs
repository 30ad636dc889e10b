//! Process-wide tracing subscriber for the engine binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const FORMAT_VAR: &str = "PBF_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info,moka=warn";

/// JSON lines by default; `PBF_LOG_FORMAT=pretty` for local runs.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let pretty = std::env::var(FORMAT_VAR)
        .map(|v| v.eq_ignore_ascii_case("pretty"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    if pretty {
        registry
            .with(fmt::layer().with_target(true).compact())
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(false)
                    .json()
                    .flatten_event(true),
            )
            .init();
    }
}
