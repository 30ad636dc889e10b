//! Infrastructure layer - locks, deck sources, notifications and state assembly.

pub mod deck_source;
pub mod locks;
pub mod notify;
pub mod state;
