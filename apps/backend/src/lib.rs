#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod state;


// Re-exports for public API
pub use config::EngineConfig;
pub use error::{AppError, StatusCategory};
pub use errors::ErrorCode;
pub use infra::state::{build_state, StateBuilder};
pub use services::{DeckCatalog, SessionFlowService, SessionViews};
pub use state::app_state::AppState;

// Prelude for test convenience
pub mod prelude {
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::repos::*;
    pub use super::services::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
