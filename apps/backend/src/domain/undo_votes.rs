//! Undo proposals against draw records: initiate, vote, resolve.

use rand::seq::SliceRandom;

use super::category::Category;
use super::events::{SessionEvent, SessionEvents};
use super::ids::{DrawId, ItemId, PlayerId};
use super::item::Item;
use super::session::Session;
use super::undo::{Resolution, UndoProposal, VoteChoice};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

impl Session {
    /// Open a proposal to reverse `draw_id`, counting the requester as a yes.
    pub fn initiate_undo(
        &mut self,
        draw_id: DrawId,
        requester: &PlayerId,
        events: &mut SessionEvents,
    ) -> Result<Option<Resolution>, DomainError> {
        let idx = self.require_member(requester)?;
        self.require_active()?;
        let username = self.participants[idx].username.clone();

        let item = self.current_item(draw_id)?;
        let at = events.at;
        let record = self.draw_record_mut(draw_id)?;
        match &record.undo {
            Some(existing) if existing.is_pending() => {
                return Err(DomainError::validation(
                    ValidationKind::UndoPending,
                    "An undo is already being voted on for this draw",
                ))
            }
            Some(existing) => {
                return Err(DomainError::proposal_closed(format!(
                    "Undo of this draw was already {}",
                    existing.resolution
                )))
            }
            None => {}
        }
        record.undo = Some(UndoProposal::open(requester.clone(), at));

        events.emit(SessionEvent::UndoInitiated {
            draw_id,
            username: username.clone(),
            item: item.clone(),
        });
        events.emit(SessionEvent::VoteCast {
            draw_id,
            username,
            choice: VoteChoice::Yes,
            item,
        });
        self.evaluate_undo(draw_id, events)
    }

    /// Record a vote on the open proposal for `draw_id`. A repeated vote
    /// replaces the earlier one.
    pub fn vote_undo(
        &mut self,
        draw_id: DrawId,
        voter: &PlayerId,
        choice: VoteChoice,
        events: &mut SessionEvents,
    ) -> Result<Option<Resolution>, DomainError> {
        let idx = self.require_member(voter)?;
        let username = self.participants[idx].username.clone();

        let item = self.current_item(draw_id)?;
        let active = self.require_active();
        let record = self.draw_record_mut(draw_id)?;
        let proposal = record.undo.as_mut().ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NoOpenProposal,
                "Nobody has asked to undo this draw",
            )
        })?;
        if proposal.is_pending() {
            active?;
        }
        proposal.cast(voter.clone(), choice)?;

        events.emit(SessionEvent::VoteCast {
            draw_id,
            username,
            choice,
            item,
        });
        self.evaluate_undo(draw_id, events)
    }

    /// Apply the voting policy to one proposal against the current roster.
    /// Returns the resolution only when it changed in this call.
    fn evaluate_undo(
        &mut self,
        draw_id: DrawId,
        events: &mut SessionEvents,
    ) -> Result<Option<Resolution>, DomainError> {
        let roster = self.roster();
        let at = events.at;
        let record = self.draw_record_mut(draw_id)?;
        let Some(proposal) = record.undo.as_mut() else {
            return Ok(None);
        };
        let Some(resolution) = proposal.evaluate(&roster, at) else {
            return Ok(None);
        };
        let item_id = record.item.id;
        let category = record.category;
        let drawer_username = record.drawer_username.clone();
        let snapshot = record.item.clone();

        let item = match resolution {
            Resolution::Approved => self.return_to_pool(item_id, category)?,
            Resolution::Rejected | Resolution::Pending => {
                self.locate_item(item_id).cloned().unwrap_or(snapshot)
            }
        };

        tracing::info!(
            session_id = %self.id,
            draw_id = %draw_id,
            category = %category,
            resolution = %resolution,
            "undo resolved"
        );
        events.emit(SessionEvent::UndoResolved {
            draw_id,
            resolution,
            drawer_username,
            item,
        });
        Ok(Some(resolution))
    }

    /// Re-run the policy on every pending proposal, e.g. after the roster
    /// shrank.
    pub(crate) fn reevaluate_open_undos(
        &mut self,
        events: &mut SessionEvents,
    ) -> Result<(), DomainError> {
        let pending: Vec<DrawId> = self
            .draws
            .iter()
            .filter(|d| d.undo.as_ref().is_some_and(UndoProposal::is_pending))
            .map(|d| d.id)
            .collect();
        for draw_id in pending {
            self.evaluate_undo(draw_id, events)?;
        }
        Ok(())
    }

    /// Reject every pending proposal; called when the session finishes.
    pub(crate) fn close_open_undos(
        &mut self,
        events: &mut SessionEvents,
    ) -> Result<(), DomainError> {
        let pending: Vec<DrawId> = self
            .draws
            .iter()
            .filter(|d| d.undo.as_ref().is_some_and(UndoProposal::is_pending))
            .map(|d| d.id)
            .collect();
        for draw_id in pending {
            let item = self.current_item(draw_id)?;
            let at = events.at;
            let record = self.draw_record_mut(draw_id)?;
            if record.undo.as_mut().is_some_and(|p| p.close(at)) {
                events.emit(SessionEvent::UndoResolved {
                    draw_id,
                    resolution: Resolution::Rejected,
                    drawer_username: record.drawer_username.clone(),
                    item,
                });
            }
        }
        Ok(())
    }

    /// Take the item back from whoever holds it (or the discard pile), reset
    /// it to pool state, put it at the front of its pool and reshuffle the
    /// whole pool. Returns the item as it was just before the return.
    fn return_to_pool(&mut self, item_id: ItemId, category: Category) -> Result<Item, DomainError> {
        let taken = self
            .participants
            .iter_mut()
            .find_map(|p| p.take_item(item_id))
            .or_else(|| {
                let pos = self.discard.iter().position(|i| i.id == item_id)?;
                Some(self.discard.remove(pos))
            });
        let Some(mut item) = taken else {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Item {item_id} drawn in session {} is not in any hand or the discard pile", self.id),
            ));
        };
        let before = item.clone();

        item.reset_for_pool();
        let mut rng = self.rng.next_rng();
        let pool = self.pools.entry(category).or_default();
        pool.push_front(item);
        pool.make_contiguous().shuffle(&mut rng);
        Ok(before)
    }

    /// The drawn item as it is now, or its draw-time snapshot.
    fn current_item(&self, draw_id: DrawId) -> Result<Item, DomainError> {
        let record = self.draw_record(draw_id)?;
        Ok(self
            .locate_item(record.item.id)
            .cloned()
            .unwrap_or_else(|| record.item.clone()))
    }
}
