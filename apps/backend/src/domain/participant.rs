use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::category::Category;
use super::ids::{ItemId, PlayerId};
use super::item::Item;
use super::ruleset::TechSpec;

/// A player's membership and in-game state within one session.
///
/// Identity (`player_id`, `username`) never changes after join. On withdrawal
/// the participant moves to the session's withdrawn list with an empty hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub player_id: PlayerId,
    pub username: String,
    pub your_turn: bool,
    pub hand: Vec<Item>,
    pub techs: Vec<TechSpec>,
    pub policies: Vec<String>,
    pub withdrawn: bool,
    pub joined_at: OffsetDateTime,
}

impl Participant {
    pub fn new(player_id: PlayerId, username: impl Into<String>, at: OffsetDateTime) -> Self {
        Self {
            player_id,
            username: username.into(),
            your_turn: false,
            hand: Vec::new(),
            techs: Vec::new(),
            policies: Vec::new(),
            withdrawn: false,
            joined_at: at,
        }
    }

    pub fn hand_count(&self, category: Category) -> usize {
        self.hand.iter().filter(|i| i.category == category).count()
    }

    pub(crate) fn take_item(&mut self, item_id: ItemId) -> Option<Item> {
        let pos = self.hand.iter().position(|i| i.id == item_id)?;
        Some(self.hand.remove(pos))
    }
}
