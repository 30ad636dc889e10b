//! Per-viewer projection of a session.
//!
//! A viewer sees their own hand in full. Other players' hidden items show
//! only their category.

use std::collections::BTreeMap;

use serde::Serialize;
use time::OffsetDateTime;

use super::category::Category;
use super::ids::{DrawId, ItemId, PlayerId, SessionId};
use super::item::Item;
use super::participant::Participant;
use super::ruleset::{RulesetType, TechSpec};
use super::session::{Session, SessionStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub name: String,
    pub ruleset: RulesetType,
    pub status: SessionStatus,
    pub capacity: u8,
    pub players: Vec<String>,
    pub turn_holder: Option<String>,
    pub winner: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleItem {
    pub id: ItemId,
    pub category: Category,
    pub description: String,
    pub hidden: bool,
}

impl VisibleItem {
    fn full(item: &Item) -> Self {
        Self {
            id: item.id,
            category: item.category,
            description: item.reveal_all(),
            hidden: item.hidden,
        }
    }

    fn public(item: &Item) -> Self {
        Self {
            id: item.id,
            category: item.category,
            description: item.reveal_public(),
            hidden: item.hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub username: String,
    pub your_turn: bool,
    pub withdrawn: bool,
    pub items: Vec<VisibleItem>,
    pub techs: Vec<TechSpec>,
    pub policies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub session: SessionSummary,
    pub viewer: PlayerId,
    pub is_member: bool,
    pub players: Vec<PlayerSummary>,
    pub pool_sizes: BTreeMap<Category, usize>,
    pub discard: Vec<VisibleItem>,
    pub open_undos: Vec<DrawId>,
}

impl Session {
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            name: self.name.clone(),
            ruleset: self.ruleset,
            status: self.status,
            capacity: self.capacity,
            players: self.participants.iter().map(|p| p.username.clone()).collect(),
            turn_holder: self.turn_holder().map(|p| p.username.clone()),
            winner: self.winner.clone(),
            created_at: self.created_at,
        }
    }

    pub fn view_for(&self, viewer: &PlayerId) -> PlayerView {
        let summarize = |p: &Participant| PlayerSummary {
            username: p.username.clone(),
            your_turn: p.your_turn,
            withdrawn: p.withdrawn,
            items: p
                .hand
                .iter()
                .map(|i| {
                    if &p.player_id == viewer {
                        VisibleItem::full(i)
                    } else {
                        VisibleItem::public(i)
                    }
                })
                .collect(),
            techs: p.techs.clone(),
            policies: p.policies.clone(),
        };

        PlayerView {
            session: self.summary(),
            viewer: viewer.clone(),
            is_member: self.participant(viewer).is_some(),
            players: self
                .participants
                .iter()
                .chain(self.withdrawn.iter())
                .map(summarize)
                .collect(),
            pool_sizes: self
                .pools
                .iter()
                .map(|(category, pool)| (*category, pool.len()))
                .collect(),
            discard: self.discard.iter().map(VisibleItem::public).collect(),
            open_undos: self
                .draws
                .iter()
                .filter(|d| d.undo.as_ref().is_some_and(|u| u.is_pending()))
                .map(|d| d.id)
                .collect(),
        }
    }
}
