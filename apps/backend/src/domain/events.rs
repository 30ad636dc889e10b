//! Facts emitted by session mutations.
//!
//! Domain operations record what happened; the service layer renders these
//! into action log entries and turn notifications.

use time::OffsetDateTime;

use super::ids::{DrawId, PlayerId};
use super::item::Item;
use super::undo::{Resolution, VoteChoice};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Created {
        username: String,
    },
    Joined {
        username: String,
    },
    /// Capacity reached; `player` holds the first turn.
    Started {
        player: PlayerId,
        username: String,
    },
    /// The turn flag moved to `player`.
    TurnPassed {
        from_username: String,
        player: PlayerId,
        username: String,
    },
    Drawn {
        draw_id: DrawId,
        player: PlayerId,
        username: String,
        item: Item,
    },
    Revealed {
        username: String,
        item: Item,
    },
    Discarded {
        username: String,
        item: Item,
    },
    Withdrew {
        username: String,
        discarded: usize,
    },
    UndoInitiated {
        draw_id: DrawId,
        username: String,
        item: Item,
    },
    VoteCast {
        draw_id: DrawId,
        username: String,
        choice: VoteChoice,
        item: Item,
    },
    UndoResolved {
        draw_id: DrawId,
        resolution: Resolution,
        drawer_username: String,
        item: Item,
    },
    TechChosen {
        username: String,
        tech: String,
    },
    PolicyChosen {
        username: String,
        policy: String,
    },
    Ended {
        winner: Option<String>,
    },
}

/// Collects events for one logical operation, stamped with one timestamp.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    pub at: OffsetDateTime,
    events: Vec<SessionEvent>,
}

impl SessionEvents {
    pub fn new(at: OffsetDateTime) -> Self {
        Self {
            at,
            events: Vec::new(),
        }
    }

    pub fn now() -> Self {
        Self::new(OffsetDateTime::now_utc())
    }

    pub fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    pub fn as_slice(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn into_vec(self) -> Vec<SessionEvent> {
        self.events
    }
}
