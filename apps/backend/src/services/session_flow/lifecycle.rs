use tracing::{debug, info};

use super::log_render::render_events;
use super::SessionFlowService;
use crate::domain::{PlayerId, RulesetType, Session, SessionEvent, SessionEvents, SessionId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};

impl SessionFlowService {
    /// Create a session for `ruleset` (a ruleset code such as `base` or `faf`)
    /// and seat its creator.
    ///
    /// The deck is built before anything is stored, so a bad ruleset leaves
    /// no partial session behind.
    pub async fn create_session(
        &self,
        name: &str,
        ruleset: &str,
        capacity: u8,
        creator: PlayerId,
        creator_username: &str,
    ) -> Result<Session, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Other("name".into()),
                "Session name must not be empty",
            )
            .into());
        }
        let ruleset = RulesetType::parse(ruleset)?;
        let seed = self.state.seeds.next_seed();
        debug!(ruleset = %ruleset, capacity, seed, "creating session");

        let deck = self.state.catalog.build_deck_set(ruleset, seed).await?;

        let mut events = SessionEvents::now();
        let mut session = Session::new(name, deck, capacity, seed, events.at)?;
        events.emit(SessionEvent::Created {
            username: creator_username.to_string(),
        });
        session.join(creator.clone(), creator_username, &mut events)?;
        session.check_invariants()?;

        let saved = self.state.store.insert(session).await?;
        info!(
            session_id = %saved.id,
            ruleset = %ruleset,
            capacity,
            player_id = %creator,
            "session created"
        );
        self.append_log(render_events(&saved, events.as_slice()))
            .await;
        Ok(saved)
    }

    pub async fn join(
        &self,
        session_id: SessionId,
        player: PlayerId,
        username: &str,
    ) -> Result<Session, AppError> {
        let outcome = self
            .run_mutation(session_id, "join", |session, events| {
                session.join(player.clone(), username, events)
            })
            .await?;
        Ok(outcome.session)
    }

    pub async fn end_turn(&self, session_id: SessionId, player: &PlayerId) -> Result<Session, AppError> {
        let outcome = self
            .run_mutation(session_id, "end_turn", |session, events| {
                session.end_turn(player, events)
            })
            .await?;
        Ok(outcome.session)
    }

    pub async fn withdraw(&self, session_id: SessionId, player: &PlayerId) -> Result<Session, AppError> {
        let outcome = self
            .run_mutation(session_id, "withdraw", |session, events| {
                session.withdraw(player, events)
            })
            .await?;
        debug!(session_id = %session_id, player_id = %player, discarded = outcome.value, "player withdrew");
        Ok(outcome.session)
    }

    /// Finish the game. `winner` is a username, or `None` for no winner.
    pub async fn end_game(
        &self,
        session_id: SessionId,
        requested_by: &PlayerId,
        winner: Option<&str>,
    ) -> Result<Session, AppError> {
        let outcome = self
            .run_mutation(session_id, "end_game", |session, events| {
                session.end(requested_by, winner, events)
            })
            .await?;
        Ok(outcome.session)
    }
}
