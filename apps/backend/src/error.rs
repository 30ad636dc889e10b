use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

/// Conventional status categories of the external request surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    NotFound,
    BadRequest,
    Forbidden,
    Conflict,
    Gone,
    Internal,
}

impl StatusCategory {
    pub const fn as_u16(&self) -> u16 {
        match self {
            StatusCategory::NotFound => 404,
            StatusCategory::BadRequest => 400,
            StatusCategory::Forbidden => 403,
            StatusCategory::Conflict => 409,
            StatusCategory::Gone => 410,
            StatusCategory::Internal => 500,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Exhausted: {detail}")]
    Exhausted { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Startup failure: {detail}")]
    FatalStartup { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
}

impl AppError {
    /// Helper method to extract error code from any error variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::Exhausted { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::FatalStartup { .. } => ErrorCode::DeckSourceUnavailable,
        }
    }

    /// Helper method to extract error detail from any error variant
    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::Exhausted { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Config { detail }
            | AppError::FatalStartup { detail }
            | AppError::Internal { detail, .. } => detail,
        }
    }

    /// Status category for the external request surface
    pub fn status(&self) -> StatusCategory {
        match self {
            AppError::Validation { .. } => StatusCategory::BadRequest,
            AppError::Exhausted { .. } => StatusCategory::Gone,
            AppError::Forbidden { .. } => StatusCategory::Forbidden,
            AppError::NotFound { .. } => StatusCategory::NotFound,
            AppError::Conflict { .. } => StatusCategory::Conflict,
            AppError::Config { .. } | AppError::FatalStartup { .. } => StatusCategory::Internal,
            AppError::Internal { .. } => StatusCategory::Internal,
        }
    }

    /// Lock timeouts and exhausted save retries are transient; the caller may retry.
    pub fn is_retryable(&self) -> bool {
        self.code() == ErrorCode::ConcurrencyConflict
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::InternalError,
            detail: detail.into(),
        }
    }
}

fn validation_code(kind: &ValidationKind) -> ErrorCode {
    match kind {
        ValidationKind::InvalidCapacity => ErrorCode::InvalidCapacity,
        ValidationKind::SessionFull => ErrorCode::SessionFull,
        ValidationKind::NotForming => ErrorCode::NotForming,
        ValidationKind::NotActive => ErrorCode::NotActive,
        ValidationKind::AlreadyFinished => ErrorCode::AlreadyFinished,
        ValidationKind::AlreadyJoined => ErrorCode::AlreadyJoined,
        ValidationKind::UsernameTaken => ErrorCode::UsernameTaken,
        ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
        ValidationKind::UnknownCategory => ErrorCode::UnknownCategory,
        ValidationKind::CategoryNotInRuleset => ErrorCode::CategoryNotInRuleset,
        ValidationKind::AlreadyRevealed => ErrorCode::AlreadyRevealed,
        ValidationKind::UndoPending => ErrorCode::UndoPending,
        ValidationKind::NoOpenProposal => ErrorCode::NoOpenProposal,
        ValidationKind::UnknownTech => ErrorCode::UnknownTech,
        ValidationKind::TechAlreadyChosen => ErrorCode::TechAlreadyChosen,
        ValidationKind::UnknownPolicy => ErrorCode::UnknownPolicy,
        ValidationKind::PolicyAlreadyChosen => ErrorCode::PolicyAlreadyChosen,
        ValidationKind::UnknownWinner => ErrorCode::UnknownWinner,
        ValidationKind::Other(_) => ErrorCode::ValidationError,
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => AppError::Validation {
                code: validation_code(&kind),
                detail,
            },
            DomainError::Exhausted(_, detail) => AppError::Exhausted {
                code: ErrorCode::PoolExhausted,
                detail,
            },
            DomainError::AccessDenied(detail) => AppError::Forbidden {
                code: ErrorCode::NotAMember,
                detail,
            },
            DomainError::ProposalClosed(detail) => AppError::Conflict {
                code: ErrorCode::ProposalClosed,
                detail,
            },
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    ConflictKind::LockTimeout | ConflictKind::RetriesExhausted => {
                        ErrorCode::ConcurrencyConflict
                    }
                    ConflictKind::SessionExists => ErrorCode::SessionExists,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Session => ErrorCode::SessionNotFound,
                    NotFoundKind::Draw => ErrorCode::DrawNotFound,
                    NotFoundKind::Item => ErrorCode::ItemNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Config(detail) => AppError::Config { detail },
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DeckSourceUnavailable => AppError::FatalStartup { detail },
                InfraErrorKind::Timeout => AppError::Internal {
                    code: ErrorCode::Timeout,
                    detail,
                },
                InfraErrorKind::DataCorruption => AppError::Internal {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                InfraErrorKind::Other(_) => AppError::Internal {
                    code: ErrorCode::InternalError,
                    detail,
                },
            },
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
