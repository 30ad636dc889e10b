//! Domain-level error type used across services and adapters.
//!
//! This error type is transport- and storage-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::Category;

/// Business rule / precondition violations. Never accompanied by a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidCapacity,
    SessionFull,
    NotForming,
    NotActive,
    AlreadyFinished,
    AlreadyJoined,
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
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// Canonical deck source could not be read.
    DeckSourceUnavailable,
    Timeout,
    DataCorruption,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Draw,
    Item,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Store rejected a save because the expected version was stale.
    OptimisticLock,
    /// Per-session lock could not be acquired in time.
    LockTimeout,
    /// Bounded retries on optimistic lock conflicts ran out.
    RetriesExhausted,
    SessionExists,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// The category pool has nothing left to draw
    Exhausted(Category, String),
    /// Caller is not a (non-withdrawn) member, or does not own the item
    AccessDenied(String),
    /// Acting on an undo proposal that is already resolved
    ProposalClosed(String),
    /// Concurrency conflict (lock timeout, stale version)
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Bad ruleset data or engine configuration
    Config(String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Exhausted(category, d) => {
                write!(f, "no more {} to draw: {d}", category.label())
            }
            DomainError::AccessDenied(d) => write!(f, "access denied: {d}"),
            DomainError::ProposalClosed(d) => write!(f, "proposal closed: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Config(d) => write!(f, "configuration error: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn exhausted(category: Category) -> Self {
        Self::Exhausted(category, format!("No more {} to draw!", category.label()))
    }
    pub fn access_denied(detail: impl Into<String>) -> Self {
        Self::AccessDenied(detail.into())
    }
    pub fn proposal_closed(detail: impl Into<String>) -> Self {
        Self::ProposalClosed(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}
