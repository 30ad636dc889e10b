//! In-process implementations of the collaborator traits.

pub mod action_log_memory;
pub mod sessions_memory;

pub use action_log_memory::InMemoryActionLog;
pub use sessions_memory::InMemorySessionStore;
