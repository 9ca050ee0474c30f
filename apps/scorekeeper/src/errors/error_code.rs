//! Error codes for the scorekeeper.
//!
//! This module defines all error codes surfaced to collaborators (CLI output,
//! any hosting layer). Add new codes here; never pass ad-hoc strings as error
//! codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input validation
    /// Bid outside `0..=hands`
    InvalidBid,
    /// Negative tricks, bonus or round number
    NegativeValue,
    /// Value could not be read as a whole number
    NotInteger,
    /// Round number outside `1..=10` or not yet created
    InvalidRoundNumber,
    /// Tricks taken outside `0..=hands`
    TricksOutOfRange,
    /// Bonus points above the per-round cap
    BonusOutOfRange,
    /// Recorded tricks do not add up to the hands in the round
    TricksSumMismatch,
    /// Player name empty after trimming
    EmptyName,
    /// Player name already on the roster (case-insensitive)
    DuplicateName,
    /// Roster already holds the maximum number of players
    TooManyPlayers,
    /// Roster below the minimum needed to play
    NotEnoughPlayers,
    /// Player id not on the roster
    PlayerNotFound,
    /// Tricks submitted for a player without a bid
    MissingBid,
    /// General validation error
    ValidationError,

    // Lifecycle
    /// Operation not allowed in the current round phase
    PhaseMismatch,
    /// Advance attempted before the round completed
    RoundNotCompleted,
    /// Round counter outside `1..=10`
    RoundOutOfRange,
    /// Game already finished
    GameComplete,
    /// Player already scored for the round
    AlreadyScored,
    /// Roster can no longer change
    RosterLocked,
    /// No round has been created
    NoActiveRound,
    /// Player still has an unscored earlier round
    EarlierRoundUnscored,

    // System
    /// Persisted or in-memory aggregate violates an invariant
    DataCorruption,
    /// Reading or writing the state file failed
    IoError,
    /// State file is not valid JSON for the expected shape
    InvalidStateFile,
    /// Configuration could not be resolved
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidBid => "INVALID_BID",
            Self::NegativeValue => "NEGATIVE_VALUE",
            Self::NotInteger => "NOT_INTEGER",
            Self::InvalidRoundNumber => "INVALID_ROUND_NUMBER",
            Self::TricksOutOfRange => "TRICKS_OUT_OF_RANGE",
            Self::BonusOutOfRange => "BONUS_OUT_OF_RANGE",
            Self::TricksSumMismatch => "TRICKS_SUM_MISMATCH",
            Self::EmptyName => "EMPTY_NAME",
            Self::DuplicateName => "DUPLICATE_NAME",
            Self::TooManyPlayers => "TOO_MANY_PLAYERS",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::MissingBid => "MISSING_BID",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::RoundNotCompleted => "ROUND_NOT_COMPLETED",
            Self::RoundOutOfRange => "ROUND_OUT_OF_RANGE",
            Self::GameComplete => "GAME_COMPLETE",
            Self::AlreadyScored => "ALREADY_SCORED",
            Self::RosterLocked => "ROSTER_LOCKED",
            Self::NoActiveRound => "NO_ACTIVE_ROUND",
            Self::EarlierRoundUnscored => "EARLIER_ROUND_UNSCORED",

            Self::DataCorruption => "DATA_CORRUPTION",
            Self::IoError => "IO_ERROR",
            Self::InvalidStateFile => "INVALID_STATE_FILE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
