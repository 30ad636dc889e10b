//! Session flow service - applies domain operations to stored sessions under
//! the per-session single-writer discipline.
//!
//! Every public method maps onto one operation of the external request
//! surface (create, join, draw, reveal, discard, undo, vote, end turn,
//! withdraw, end game, research).

mod draws;
mod lifecycle;
mod log_render;
mod mutation;
mod research;
mod undo;

use crate::state::app_state::AppState;

pub use mutation::MutationOutcome;

#[derive(Debug, Clone)]
pub struct SessionFlowService {
    state: AppState,
}

impl SessionFlowService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
