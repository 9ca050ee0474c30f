//! Domain-level error type used across the core, the game-flow service and
//! the file adapter.
//!
//! This error type is transport- and storage-agnostic. Callers that need a
//! code/detail pair convert it into `crate::error::AppError` via the provided
//! `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Input shape/range problems. The offending call left state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidBid,
    NegativeValue,
    NotInteger,
    InvalidRoundNumber,
    TricksOutOfRange,
    BonusOutOfRange,
    TricksSumMismatch,
    EmptyName,
    DuplicateName,
    TooManyPlayers,
    NotEnoughPlayers,
    UnknownPlayer,
    MissingBid,
    Other(String),
}

/// Operation attempted in the wrong lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateKind {
    WrongPhase,
    RoundNotCompleted,
    RoundOutOfRange,
    GameComplete,
    AlreadyScored,
    RosterLocked,
    NoActiveRound,
    EarlierRoundUnscored,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Bad input shape or range
    Validation(ValidationKind, String),
    /// Operation not allowed in the current phase
    State(StateKind, String),
    /// Aggregate invariant broken (scores drifted, corrupt snapshot)
    Integrity(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::State(kind, d) => write!(f, "state error {kind:?}: {d}"),
            DomainError::Integrity(d) => write!(f, "integrity error: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    /// Shorthand for `Validation(ValidationKind::Other(..))`.
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn state(kind: StateKind, detail: impl Into<String>) -> Self {
        Self::State(kind, detail.into())
    }

    pub fn integrity(detail: impl Into<String>) -> Self {
        Self::Integrity(detail.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(..))
    }

    pub fn is_state(&self) -> bool {
        matches!(self, DomainError::State(..))
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, DomainError::Integrity(_))
    }

    /// Stable code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::InvalidBid => ErrorCode::InvalidBid,
                ValidationKind::NegativeValue => ErrorCode::NegativeValue,
                ValidationKind::NotInteger => ErrorCode::NotInteger,
                ValidationKind::InvalidRoundNumber => ErrorCode::InvalidRoundNumber,
                ValidationKind::TricksOutOfRange => ErrorCode::TricksOutOfRange,
                ValidationKind::BonusOutOfRange => ErrorCode::BonusOutOfRange,
                ValidationKind::TricksSumMismatch => ErrorCode::TricksSumMismatch,
                ValidationKind::EmptyName => ErrorCode::EmptyName,
                ValidationKind::DuplicateName => ErrorCode::DuplicateName,
                ValidationKind::TooManyPlayers => ErrorCode::TooManyPlayers,
                ValidationKind::NotEnoughPlayers => ErrorCode::NotEnoughPlayers,
                ValidationKind::UnknownPlayer => ErrorCode::PlayerNotFound,
                ValidationKind::MissingBid => ErrorCode::MissingBid,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::State(kind, _) => match kind {
                StateKind::WrongPhase => ErrorCode::PhaseMismatch,
                StateKind::RoundNotCompleted => ErrorCode::RoundNotCompleted,
                StateKind::RoundOutOfRange => ErrorCode::RoundOutOfRange,
                StateKind::GameComplete => ErrorCode::GameComplete,
                StateKind::AlreadyScored => ErrorCode::AlreadyScored,
                StateKind::RosterLocked => ErrorCode::RosterLocked,
                StateKind::NoActiveRound => ErrorCode::NoActiveRound,
                StateKind::EarlierRoundUnscored => ErrorCode::EarlierRoundUnscored,
            },
            DomainError::Integrity(_) => ErrorCode::DataCorruption,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d) | DomainError::State(_, d) | DomainError::Integrity(d) => d,
        }
    }
}
