//! Session lifecycle and turn order: join, end turn, withdraw, end.

use rand::Rng;

use super::events::{SessionEvent, SessionEvents};
use super::ids::PlayerId;
use super::participant::Participant;
use super::session::{Session, SessionStatus};
use crate::errors::domain::{DomainError, ValidationKind};

impl Session {
    /// Add a participant. Reaching capacity starts the session and picks the
    /// first turn holder uniformly at random from the session RNG.
    pub fn join(
        &mut self,
        player: PlayerId,
        username: &str,
        events: &mut SessionEvents,
    ) -> Result<(), DomainError> {
        if self.status != SessionStatus::Forming {
            return Err(DomainError::validation(
                ValidationKind::NotForming,
                "Session is no longer accepting players",
            ));
        }
        if self.participant(&player).is_some() {
            return Err(DomainError::validation(
                ValidationKind::AlreadyJoined,
                format!("{username} already joined this session"),
            ));
        }
        if self.withdrawn.iter().any(|p| p.player_id == player) {
            return Err(DomainError::validation(
                ValidationKind::AlreadyJoined,
                format!("{username} withdrew from this session and cannot rejoin"),
            ));
        }
        if self
            .participants
            .iter()
            .chain(self.withdrawn.iter())
            .any(|p| p.username.eq_ignore_ascii_case(username))
        {
            return Err(DomainError::validation(
                ValidationKind::UsernameTaken,
                format!("The name {username} is already used in this session"),
            ));
        }
        if self.is_full() {
            return Err(DomainError::validation(
                ValidationKind::SessionFull,
                format!("Session is full ({} players)", self.capacity),
            ));
        }

        self.participants
            .push(Participant::new(player, username, events.at));
        events.emit(SessionEvent::Joined {
            username: username.to_string(),
        });

        if self.is_full() {
            self.start(events);
        }
        Ok(())
    }

    fn start(&mut self, events: &mut SessionEvents) {
        let first = self.rng.next_rng().random_range(0..self.participants.len());
        let holder = &mut self.participants[first];
        holder.your_turn = true;
        self.status = SessionStatus::Active;
        events.emit(SessionEvent::Started {
            player: holder.player_id.clone(),
            username: holder.username.clone(),
        });
    }

    /// Move the turn flag from roster position `from` to the next participant,
    /// wrapping around. A lone participant keeps the turn.
    fn pass_turn_from(&mut self, from: usize, events: &mut SessionEvents) {
        let len = self.participants.len();
        if len <= 1 {
            return;
        }
        let next = (from + 1) % len;
        self.participants[from].your_turn = false;
        self.participants[next].your_turn = true;
        events.emit(SessionEvent::TurnPassed {
            from_username: self.participants[from].username.clone(),
            player: self.participants[next].player_id.clone(),
            username: self.participants[next].username.clone(),
        });
    }

    pub fn end_turn(
        &mut self,
        player: &PlayerId,
        events: &mut SessionEvents,
    ) -> Result<(), DomainError> {
        self.require_active()?;
        let idx = self.require_member(player)?;
        if !self.participants[idx].your_turn {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("It is not {}'s turn", self.participants[idx].username),
            ));
        }
        self.pass_turn_from(idx, events);
        Ok(())
    }

    /// Leave the session at any status. Returns the number of items moved to
    /// the discard pile.
    pub fn withdraw(
        &mut self,
        player: &PlayerId,
        events: &mut SessionEvents,
    ) -> Result<usize, DomainError> {
        let idx = self.require_member(player)?;

        if self.status == SessionStatus::Active && self.participants[idx].your_turn {
            self.pass_turn_from(idx, events);
        }

        let mut leaving = self.participants.remove(idx);
        leaving.your_turn = false;
        leaving.withdrawn = true;
        let discarded = leaving.hand.len();
        for mut item in leaving.hand.drain(..) {
            item.owner = None;
            self.discard.push(item);
        }
        events.emit(SessionEvent::Withdrew {
            username: leaving.username.clone(),
            discarded,
        });
        self.withdrawn.push(leaving);

        if self.status == SessionStatus::Active {
            if self.participants.is_empty() {
                self.close_open_undos(events)?;
                self.status = SessionStatus::Finished;
                events.emit(SessionEvent::Ended { winner: None });
            } else {
                self.reevaluate_open_undos(events)?;
            }
        }
        Ok(discarded)
    }

    /// Finish an active session, optionally naming a winner by username.
    pub fn end(
        &mut self,
        requested_by: &PlayerId,
        winner: Option<&str>,
        events: &mut SessionEvents,
    ) -> Result<(), DomainError> {
        match self.status {
            SessionStatus::Finished => {
                return Err(DomainError::validation(
                    ValidationKind::AlreadyFinished,
                    "Session has already ended",
                ))
            }
            SessionStatus::Forming => {
                return Err(DomainError::validation(
                    ValidationKind::NotActive,
                    "Session has not started yet",
                ))
            }
            SessionStatus::Active => {}
        }
        self.require_member(requested_by)?;

        let winner = match winner.map(str::trim).filter(|w| !w.is_empty()) {
            None => None,
            Some(wanted) => Some(
                self.participants
                    .iter()
                    .chain(self.withdrawn.iter())
                    .find(|p| p.username.eq_ignore_ascii_case(wanted))
                    .map(|p| p.username.clone())
                    .ok_or_else(|| {
                        DomainError::validation(
                            ValidationKind::UnknownWinner,
                            format!("{wanted} did not play in this session"),
                        )
                    })?,
            ),
        };

        for p in &mut self.participants {
            p.your_turn = false;
        }
        self.close_open_undos(events)?;
        self.status = SessionStatus::Finished;
        self.winner = winner.clone();
        events.emit(SessionEvent::Ended { winner });
        Ok(())
    }
}
