//! Undo proposals and the majority voting policy.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::ids::PlayerId;
use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    Yes,
    No,
}

impl VoteChoice {
    pub fn from_bool(yes: bool) -> Self {
        if yes {
            VoteChoice::Yes
        } else {
            VoteChoice::No
        }
    }

    pub fn as_word(&self) -> &'static str {
        match self {
            VoteChoice::Yes => "yes",
            VoteChoice::No => "no",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Pending,
    Approved,
    Rejected,
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Resolution::Pending => f.write_str("pending"),
            Resolution::Approved => f.write_str("approved"),
            Resolution::Rejected => f.write_str("rejected"),
        }
    }
}

/// Counted votes from the current roster only.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tally {
    pub yes: usize,
    pub no: usize,
    pub roster: usize,
}

/// Majority of the full roster decides.
///
/// Approved once yes votes exceed half the roster. Rejected once the
/// remaining yes potential (roster minus no votes) can no longer exceed half.
pub fn decide(tally: Tally) -> Resolution {
    let n = tally.roster;
    if 2 * tally.yes > n {
        Resolution::Approved
    } else if 2 * n.saturating_sub(tally.no) <= n {
        Resolution::Rejected
    } else {
        Resolution::Pending
    }
}

/// A request to reverse one draw. Resolution is monotonic: once it leaves
/// `Pending` it never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoProposal {
    pub initiator: PlayerId,
    pub votes: BTreeMap<PlayerId, VoteChoice>,
    pub resolution: Resolution,
    pub created_at: OffsetDateTime,
    pub resolved_at: Option<OffsetDateTime>,
}

impl UndoProposal {
    /// A new pending proposal carrying the initiator's yes vote.
    pub fn open(initiator: PlayerId, at: OffsetDateTime) -> Self {
        let mut votes = BTreeMap::new();
        votes.insert(initiator.clone(), VoteChoice::Yes);
        Self {
            initiator,
            votes,
            resolution: Resolution::Pending,
            created_at: at,
            resolved_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.resolution == Resolution::Pending
    }

    /// Record (or overwrite) a vote. Fails once resolved.
    pub fn cast(&mut self, voter: PlayerId, choice: VoteChoice) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::proposal_closed(format!(
                "Undo was already {}",
                self.resolution
            )));
        }
        self.votes.insert(voter, choice);
        Ok(())
    }

    pub fn tally(&self, roster: &[PlayerId]) -> Tally {
        let mut yes = 0;
        let mut no = 0;
        for player in roster {
            match self.votes.get(player) {
                Some(VoteChoice::Yes) => yes += 1,
                Some(VoteChoice::No) => no += 1,
                None => {}
            }
        }
        Tally {
            yes,
            no,
            roster: roster.len(),
        }
    }

    /// Reject a still-pending proposal without further votes. Returns whether
    /// anything changed.
    pub fn close(&mut self, at: OffsetDateTime) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.resolution = Resolution::Rejected;
        self.resolved_at = Some(at);
        true
    }

    /// Apply the voting policy. Returns the new resolution only on the
    /// transition out of `Pending`.
    pub fn evaluate(&mut self, roster: &[PlayerId], at: OffsetDateTime) -> Option<Resolution> {
        if !self.is_pending() {
            return None;
        }
        match decide(self.tally(roster)) {
            Resolution::Pending => None,
            decided => {
                self.resolution = decided;
                self.resolved_at = Some(at);
                Some(decided)
            }
        }
    }
}
