//! Error codes for the play-by-forum session engine.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in responses of the external request surface.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Access
    /// Caller is not a non-withdrawn participant of the session
    NotAMember,

    // Request Validation
    InvalidCapacity,
    SessionFull,
    NotForming,
    NotActive,
    AlreadyFinished,
    AlreadyJoined,
    /// Another participant, past or present, already uses the name
    UsernameTaken,
    OutOfTurn,
    UnknownCategory,
    CategoryNotInRuleset,
    AlreadyRevealed,
    UndoPending,
    NoOpenProposal,
    UnknownTech,
    TechAlreadyChosen,
    UnknownPolicy,
    PolicyAlreadyChosen,
    UnknownWinner,
    /// General validation error
    ValidationError,

    // Exhausted
    /// Category pool is empty
    PoolExhausted,

    // Resource Not Found
    SessionNotFound,
    DrawNotFound,
    ItemNotFound,
    NotFound,

    // Conflicts
    /// Undo proposal already resolved
    ProposalClosed,
    /// Stale version on save
    OptimisticLock,
    /// Lock timeout or retries exhausted; caller may retry
    ConcurrencyConflict,
    SessionExists,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Unknown ruleset or malformed ruleset data
    ConfigError,
    /// Canonical deck source unreadable
    DeckSourceUnavailable,
    /// Collaborator did not answer in time
    Timeout,
    /// Session invariants violated
    DataCorruption,
    InternalError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotAMember => "NOT_A_MEMBER",

            Self::InvalidCapacity => "INVALID_CAPACITY",
            Self::SessionFull => "SESSION_FULL",
            Self::NotForming => "NOT_FORMING",
            Self::NotActive => "NOT_ACTIVE",
            Self::AlreadyFinished => "ALREADY_FINISHED",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::UnknownCategory => "UNKNOWN_CATEGORY",
            Self::CategoryNotInRuleset => "CATEGORY_NOT_IN_RULESET",
            Self::AlreadyRevealed => "ALREADY_REVEALED",
            Self::UndoPending => "UNDO_PENDING",
            Self::NoOpenProposal => "NO_OPEN_PROPOSAL",
            Self::UnknownTech => "UNKNOWN_TECH",
            Self::TechAlreadyChosen => "TECH_ALREADY_CHOSEN",
            Self::UnknownPolicy => "UNKNOWN_POLICY",
            Self::PolicyAlreadyChosen => "POLICY_ALREADY_CHOSEN",
            Self::UnknownWinner => "UNKNOWN_WINNER",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::PoolExhausted => "POOL_EXHAUSTED",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::DrawNotFound => "DRAW_NOT_FOUND",
            Self::ItemNotFound => "ITEM_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::ProposalClosed => "PROPOSAL_CLOSED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            Self::SessionExists => "SESSION_EXISTS",
            Self::Conflict => "CONFLICT",

            Self::ConfigError => "CONFIG_ERROR",
            Self::DeckSourceUnavailable => "DECK_SOURCE_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
