//! Collaborator traits the session engine depends on.

pub mod action_log;
pub mod sessions;

pub use action_log::{ActionLog, LogEntry, Visibility};
pub use sessions::SessionStore;
