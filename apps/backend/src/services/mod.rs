pub mod deck_catalog;
pub mod session_flow;
pub mod views;

pub use deck_catalog::DeckCatalog;
pub use session_flow::SessionFlowService;
pub use views::{Highscore, Highscores, SessionViews};
