//! Turn notifications.

use async_trait::async_trait;
use tracing::info;

use crate::domain::{PlayerId, SessionId};

/// Tells a player it is their turn. Implementations absorb their own
/// failures; a turn advance never fails because of a notification.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, session_id: SessionId, next_player: &PlayerId, username: &str);
}

/// Emits a structured log line per notification.
#[derive(Debug, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, session_id: SessionId, next_player: &PlayerId, username: &str) {
        info!(
            session_id = %session_id,
            player_id = %next_player,
            username,
            "turn notification"
        );
    }
}
