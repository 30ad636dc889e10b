//! Read projections. Reads never take the session lock; they see the state
//! as of the last committed write.

use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::{
    Category, DrawId, PlayerId, PlayerView, Resolution, Session, SessionId, SessionStatus,
    SessionSummary,
};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::{LogEntry, Visibility};
use crate::state::app_state::AppState;

/// What a player sees: the session projection plus every log entry visible
/// to them.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSessionView {
    pub view: PlayerView,
    pub log: Vec<LogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndoSummary {
    pub draw_id: DrawId,
    pub category: Category,
    pub drawer: String,
    /// Public description of the drawn item.
    pub item: String,
    pub initiator: PlayerId,
    pub yes: usize,
    pub no: usize,
    pub resolution: Resolution,
    pub created_at: OffsetDateTime,
    pub resolved_at: Option<OffsetDateTime>,
}

/// Wins credited to one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highscore {
    pub name: String,
    pub wins: usize,
}

/// Win counts over finished sessions, most wins first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highscores {
    pub players: Vec<Highscore>,
    /// Civs held by the winner when the session ended.
    pub civs: Vec<Highscore>,
}

#[derive(Debug, Clone)]
pub struct SessionViews {
    state: AppState,
}

impl SessionViews {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn session(&self, session_id: SessionId) -> Result<SessionSummary, AppError> {
        Ok(self.state.store.load(session_id).await?.summary())
    }

    /// Full aggregate, including hidden hands, pool order and RNG state.
    /// For operators and tests; never hand it to a player.
    pub async fn snapshot(&self, session_id: SessionId) -> Result<Session, AppError> {
        Ok(self.state.store.load(session_id).await?)
    }

    /// Sessions `player` has joined, including ones they withdrew from.
    pub async fn sessions_for_player(
        &self,
        player: &PlayerId,
    ) -> Result<Vec<SessionSummary>, AppError> {
        let sessions = self.state.store.list(None).await?;
        Ok(sessions
            .iter()
            .filter(|s| username_of(s, player).is_some())
            .map(Session::summary)
            .collect())
    }

    pub async fn highscores(&self) -> Result<Highscores, AppError> {
        let finished = self.state.store.list(Some(SessionStatus::Finished)).await?;
        let mut players: HashMap<String, usize> = HashMap::new();
        let mut civs: HashMap<String, usize> = HashMap::new();

        for session in &finished {
            let Some(winner) = &session.winner else {
                continue;
            };
            *players.entry(winner.clone()).or_default() += 1;

            let hand = session
                .participants
                .iter()
                .find(|p| &p.username == winner)
                .map(|p| p.hand.as_slice())
                .unwrap_or_default();
            for civ in hand.iter().filter(|i| i.category == Category::Civ) {
                *civs.entry(civ.name.clone()).or_default() += 1;
            }
        }

        Ok(Highscores {
            players: ranked(players),
            civs: ranked(civs),
        })
    }

    pub async fn list_sessions(
        &self,
        status: Option<SessionStatus>,
    ) -> Result<Vec<SessionSummary>, AppError> {
        let sessions = self.state.store.list(status).await?;
        Ok(sessions.iter().map(Session::summary).collect())
    }

    pub async fn player_view(
        &self,
        session_id: SessionId,
        viewer: &PlayerId,
    ) -> Result<PlayerSessionView, AppError> {
        let session = self.state.store.load(session_id).await?;
        let username = username_of(&session, viewer);
        let log = self
            .state
            .action_log
            .entries(session_id)
            .await?
            .into_iter()
            .filter(|e| match &username {
                Some(name) => e.visibility.visible_to(name),
                None => e.visibility == Visibility::Public,
            })
            .collect();
        Ok(PlayerSessionView {
            view: session.view_for(viewer),
            log,
        })
    }

    pub async fn public_log(&self, session_id: SessionId) -> Result<Vec<LogEntry>, AppError> {
        self.state.store.load(session_id).await?;
        Ok(self
            .state
            .action_log
            .entries(session_id)
            .await?
            .into_iter()
            .filter(|e| e.visibility == Visibility::Public)
            .collect())
    }

    /// Entries addressed privately to `player`. Outsiders have none.
    pub async fn private_log(
        &self,
        session_id: SessionId,
        player: &PlayerId,
    ) -> Result<Vec<LogEntry>, AppError> {
        let session = self.state.store.load(session_id).await?;
        let Some(username) = username_of(&session, player) else {
            return Err(DomainError::access_denied(format!(
                "Player {player} is not a participant of this session"
            ))
            .into());
        };
        Ok(self
            .state
            .action_log
            .entries(session_id)
            .await?
            .into_iter()
            .filter(|e| e.visibility == Visibility::PrivateTo(username.clone()))
            .collect())
    }

    /// Username of the current turn holder, if the session is active.
    pub async fn turn_holder(&self, session_id: SessionId) -> Result<Option<String>, AppError> {
        let session = self.state.store.load(session_id).await?;
        Ok(session.turn_holder().map(|p| p.username.clone()))
    }

    pub async fn active_undos(&self, session_id: SessionId) -> Result<Vec<UndoSummary>, AppError> {
        let session = self.state.store.load(session_id).await?;
        Ok(undo_summaries(&session, |r| r == Resolution::Pending))
    }

    pub async fn finished_undos(&self, session_id: SessionId) -> Result<Vec<UndoSummary>, AppError> {
        let session = self.state.store.load(session_id).await?;
        Ok(undo_summaries(&session, |r| r != Resolution::Pending))
    }
}

fn ranked(wins: HashMap<String, usize>) -> Vec<Highscore> {
    let mut scores: Vec<Highscore> = wins
        .into_iter()
        .map(|(name, wins)| Highscore { name, wins })
        .collect();
    scores.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.name.cmp(&b.name)));
    scores
}

/// Withdrawn players keep their username for reading history.
fn username_of(session: &Session, player: &PlayerId) -> Option<String> {
    session
        .participants
        .iter()
        .chain(session.withdrawn.iter())
        .find(|p| &p.player_id == player)
        .map(|p| p.username.clone())
}

fn undo_summaries(session: &Session, keep: impl Fn(Resolution) -> bool) -> Vec<UndoSummary> {
    let roster = session.roster();
    session
        .draws
        .iter()
        .filter_map(|record| {
            let proposal = record.undo.as_ref()?;
            if !keep(proposal.resolution) {
                return None;
            }
            let tally = proposal.tally(&roster);
            let item = session
                .locate_item(record.item.id)
                .unwrap_or(&record.item)
                .reveal_public();
            Some(UndoSummary {
                draw_id: record.id,
                category: record.category,
                drawer: record.drawer_username.clone(),
                item,
                initiator: proposal.initiator.clone(),
                yes: tally.yes,
                no: tally.no,
                resolution: proposal.resolution,
                created_at: proposal.created_at,
                resolved_at: proposal.resolved_at,
            })
        })
        .collect()
}
