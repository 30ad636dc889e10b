//! The session aggregate and its invariants.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::category::Category;
use super::deck::DeckSet;
use super::ids::{DrawId, PlayerId, SessionId};
use super::item::Item;
use super::participant::Participant;
use super::rng::SessionRng;
use super::ruleset::{RulesetType, TechSpec};
use super::undo::UndoProposal;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};

pub const MIN_CAPACITY: u8 = 2;
pub const MAX_CAPACITY: u8 = 7;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Forming,
    Active,
    Finished,
}

/// Audit entry for one draw; the target of a possible undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub id: DrawId,
    pub session_id: SessionId,
    pub category: Category,
    /// The item as it was handed to the drawer.
    pub item: Item,
    pub drawer: PlayerId,
    pub drawer_username: String,
    pub drawn_at: OffsetDateTime,
    pub undo: Option<UndoProposal>,
}

/// One running game. Mutated only through the operations in the sibling
/// `turns`, `draws`, `undo_votes` and `research` modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub ruleset: RulesetType,
    pub capacity: u8,
    pub status: SessionStatus,
    pub winner: Option<String>,
    /// Non-withdrawn participants in join order (the roster order).
    pub participants: Vec<Participant>,
    pub withdrawn: Vec<Participant>,
    /// Front of each deque is the next item to draw.
    pub pools: BTreeMap<Category, VecDeque<Item>>,
    pub discard: Vec<Item>,
    pub canonical_sizes: BTreeMap<Category, usize>,
    pub techs: Vec<TechSpec>,
    pub policies: Vec<String>,
    pub draws: Vec<DrawRecord>,
    pub rng: SessionRng,
    /// Optimistic concurrency token; bumped by the store on every save.
    pub version: u64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Session {
    pub fn new(
        name: impl Into<String>,
        deck: DeckSet,
        capacity: u8,
        seed: u64,
        at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
            return Err(DomainError::validation(
                ValidationKind::InvalidCapacity,
                format!("Capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}, got {capacity}"),
            ));
        }

        let canonical_sizes = deck.sizes();
        let pools = deck
            .pools
            .into_iter()
            .map(|(category, items)| (category, VecDeque::from(items)))
            .collect();

        Ok(Self {
            id: SessionId::new(),
            name: name.into(),
            ruleset: deck.ruleset,
            capacity,
            status: SessionStatus::Forming,
            winner: None,
            participants: Vec::new(),
            withdrawn: Vec::new(),
            pools,
            discard: Vec::new(),
            canonical_sizes,
            techs: deck.techs,
            policies: deck.policies,
            draws: Vec::new(),
            rng: SessionRng::new(seed),
            version: 0,
            created_at: at,
            updated_at: at,
        })
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= usize::from(self.capacity)
    }

    /// Player ids of the current (non-withdrawn) roster.
    pub fn roster(&self) -> Vec<PlayerId> {
        self.participants
            .iter()
            .map(|p| p.player_id.clone())
            .collect()
    }

    pub fn participant(&self, player: &PlayerId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.player_id == player)
    }

    pub fn turn_holder(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.your_turn)
    }

    /// Index of `player` in the roster, or access denied for non-members and
    /// withdrawn players.
    pub fn require_member(&self, player: &PlayerId) -> Result<usize, DomainError> {
        if let Some(idx) = self
            .participants
            .iter()
            .position(|p| &p.player_id == player)
        {
            return Ok(idx);
        }
        if self.withdrawn.iter().any(|p| &p.player_id == player) {
            return Err(DomainError::access_denied(format!(
                "Player {player} has withdrawn from this session"
            )));
        }
        Err(DomainError::access_denied(format!(
            "Player {player} is not a participant of this session"
        )))
    }

    pub fn require_active(&self) -> Result<(), DomainError> {
        match self.status {
            SessionStatus::Active => Ok(()),
            SessionStatus::Forming => Err(DomainError::validation(
                ValidationKind::NotActive,
                "Session has not started yet",
            )),
            SessionStatus::Finished => Err(DomainError::validation(
                ValidationKind::NotActive,
                "Session is finished",
            )),
        }
    }

    pub fn draw_record(&self, draw_id: DrawId) -> Result<&DrawRecord, DomainError> {
        self.draws
            .iter()
            .find(|d| d.id == draw_id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Draw, format!("Draw {draw_id}")))
    }

    pub(crate) fn draw_record_mut(&mut self, draw_id: DrawId) -> Result<&mut DrawRecord, DomainError> {
        self.draws
            .iter_mut()
            .find(|d| d.id == draw_id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Draw, format!("Draw {draw_id}")))
    }

    pub fn pool_size(&self, category: Category) -> usize {
        self.pools.get(&category).map_or(0, VecDeque::len)
    }

    /// Items of `category` currently accounted for anywhere in the session.
    pub fn accounted(&self, category: Category) -> usize {
        let in_discard = self
            .discard
            .iter()
            .filter(|i| i.category == category)
            .count();
        let in_hands: usize = self
            .participants
            .iter()
            .chain(self.withdrawn.iter())
            .map(|p| p.hand_count(category))
            .sum();
        self.pool_size(category) + in_discard + in_hands
    }

    /// Structural invariants that must hold after every committed mutation.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        let corrupt = |detail: String| {
            Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Session {}: {detail}", self.id),
            ))
        };

        if self.participants.len() > usize::from(self.capacity) {
            return corrupt(format!(
                "{} participants exceed capacity {}",
                self.participants.len(),
                self.capacity
            ));
        }

        let holders = self.participants.iter().filter(|p| p.your_turn).count();
        match self.status {
            SessionStatus::Active if holders != 1 => {
                return corrupt(format!("{holders} turn holders while active"));
            }
            SessionStatus::Forming | SessionStatus::Finished if holders != 0 => {
                return corrupt(format!("{holders} turn holders while not active"));
            }
            _ => {}
        }

        if self.status == SessionStatus::Finished
            && self
                .draws
                .iter()
                .any(|d| d.undo.as_ref().is_some_and(|u| u.is_pending()))
        {
            return corrupt("pending undo in a finished session".to_string());
        }

        for (category, expected) in &self.canonical_sizes {
            let actual = self.accounted(*category);
            if actual != *expected {
                return corrupt(format!(
                    "category {category} accounts for {actual} items, canonical deck has {expected}"
                ));
            }
        }

        for p in &self.participants {
            if let Some(item) = p.hand.iter().find(|i| i.owner.as_ref() != Some(&p.player_id)) {
                return corrupt(format!("item {} in hand of {} has wrong owner", item.id, p.username));
            }
        }
        if let Some(p) = self.withdrawn.iter().find(|p| !p.hand.is_empty()) {
            return corrupt(format!("withdrawn participant {} still holds items", p.username));
        }
        if let Some(item) = self
            .pools
            .values()
            .flatten()
            .chain(self.discard.iter())
            .find(|i| i.owner.is_some())
        {
            return corrupt(format!("unowned item {} has an owner", item.id));
        }

        Ok(())
    }
}
