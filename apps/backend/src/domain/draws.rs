//! Drawing, revealing and discarding items.

use super::category::Category;
use super::events::{SessionEvent, SessionEvents};
use super::ids::{DrawId, ItemId, PlayerId};
use super::item::Item;
use super::session::{DrawRecord, Session};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

impl Session {
    /// Pop the next item of `category` into the caller's hand.
    pub fn draw(
        &mut self,
        player: &PlayerId,
        category: Category,
        events: &mut SessionEvents,
    ) -> Result<DrawRecord, DomainError> {
        self.require_active()?;
        let idx = self.require_member(player)?;

        let pool = self.pools.get_mut(&category).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::CategoryNotInRuleset,
                format!("{category} is not part of the {} ruleset", self.ruleset),
            )
        })?;
        let mut item = pool
            .pop_front()
            .ok_or_else(|| DomainError::exhausted(category))?;

        item.owner = Some(player.clone());
        item.hidden = !category.is_public_by_default();

        let drawer = &mut self.participants[idx];
        drawer.hand.push(item.clone());
        let record = DrawRecord {
            id: DrawId::new(),
            session_id: self.id,
            category,
            item: item.clone(),
            drawer: player.clone(),
            drawer_username: drawer.username.clone(),
            drawn_at: events.at,
            undo: None,
        };
        self.draws.push(record.clone());

        events.emit(SessionEvent::Drawn {
            draw_id: record.id,
            player: player.clone(),
            username: record.drawer_username.clone(),
            item,
        });
        Ok(record)
    }

    pub fn reveal(
        &mut self,
        player: &PlayerId,
        item_id: ItemId,
        events: &mut SessionEvents,
    ) -> Result<Item, DomainError> {
        self.require_active()?;
        let idx = self.require_member(player)?;
        let pos = self.owned_position(idx, item_id)?;

        let owner = &mut self.participants[idx];
        let item = &mut owner.hand[pos];
        if !item.hidden {
            return Err(DomainError::validation(
                ValidationKind::AlreadyRevealed,
                format!("{} is already revealed", item.reveal_all()),
            ));
        }
        item.hidden = false;
        let revealed = item.clone();

        events.emit(SessionEvent::Revealed {
            username: owner.username.clone(),
            item: revealed.clone(),
        });
        Ok(revealed)
    }

    pub fn discard_item(
        &mut self,
        player: &PlayerId,
        item_id: ItemId,
        events: &mut SessionEvents,
    ) -> Result<Item, DomainError> {
        self.require_active()?;
        let idx = self.require_member(player)?;
        self.owned_position(idx, item_id)?;

        let owner = &mut self.participants[idx];
        let mut item = owner
            .take_item(item_id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Item, format!("Item {item_id}")))?;
        item.owner = None;
        self.discard.push(item.clone());

        events.emit(SessionEvent::Discarded {
            username: owner.username.clone(),
            item: item.clone(),
        });
        Ok(item)
    }

    /// Position of `item_id` in participant `idx`'s hand. Items held by
    /// anyone else, or lying in a pile, are not theirs to act on.
    fn owned_position(&self, idx: usize, item_id: ItemId) -> Result<usize, DomainError> {
        if let Some(pos) = self.participants[idx]
            .hand
            .iter()
            .position(|i| i.id == item_id)
        {
            return Ok(pos);
        }
        if self.locate_item(item_id).is_some() {
            return Err(DomainError::access_denied(format!(
                "{} does not own item {item_id}",
                self.participants[idx].username
            )));
        }
        Err(DomainError::not_found(
            NotFoundKind::Item,
            format!("Item {item_id}"),
        ))
    }

    /// Find an item anywhere in the session.
    pub fn locate_item(&self, item_id: ItemId) -> Option<&Item> {
        self.participants
            .iter()
            .chain(self.withdrawn.iter())
            .flat_map(|p| p.hand.iter())
            .chain(self.discard.iter())
            .chain(self.pools.values().flatten())
            .find(|i| i.id == item_id)
    }
}
