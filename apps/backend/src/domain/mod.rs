//! Domain layer: pure session logic types and helpers.

pub mod category;
pub mod deck;
pub mod events;
pub mod ids;
pub mod item;
pub mod participant;
pub mod player_view;
pub mod rng;
pub mod ruleset;
pub mod seed_derivation;
pub mod session;
pub mod undo;

mod draws;
mod research;
mod turns;
mod undo_votes;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod tests_turns;

// Re-exports for ergonomics
pub use category::Category;
pub use deck::DeckSet;
pub use events::{SessionEvent, SessionEvents};
pub use ids::{DrawId, ItemId, LogEntryId, PlayerId, SessionId};
pub use item::{Item, ItemPayload};
pub use participant::Participant;
pub use player_view::{PlayerSummary, PlayerView, SessionSummary, VisibleItem};
pub use rng::{EntropySeedSource, FixedSeedSource, SeedSource, SessionRng};
pub use ruleset::{CanonicalDeck, CardSpec, RulesetType, TechSpec};
pub use seed_derivation::{derive_category_seed, derive_step_seed};
pub use session::{DrawRecord, Session, SessionStatus, MAX_CAPACITY, MIN_CAPACITY};
pub use undo::{Resolution, Tally, UndoProposal, VoteChoice};
