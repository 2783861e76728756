//! Error types for the round engine, puzzle loading and effect dispatch
//!
//! Every error here is locally recoverable. None of them leave a round in a
//! partially updated state.

use crate::game::{Item, Phase};

/// A command was refused by the round state machine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    /// Selections and submissions are only accepted while playing
    #[error("round is not accepting moves (phase: {0:?})")]
    NotPlaying(Phase),
    /// Outcome already determined; the round is frozen
    #[error("round is already over")]
    RoundOver,
    /// The item is not part of today's pool
    #[error("unknown item: {0}")]
    UnknownItem(Item),
    /// `initialize` called on a round that already has puzzle data
    #[error("round is already initialized")]
    AlreadyInitialized,
    /// Puzzle data was rejected; the round stays in `Loading`
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

/// Puzzle data could not be used to start a round
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("puzzle has no items")]
    EmptyPool,
    #[error("item label is empty")]
    EmptyLabel,
    #[error("duplicate item in pool: {0}")]
    DuplicateItem(Item),
    #[error("answer key must have exactly {expected} items, got {actual}")]
    AnswerKeySize { expected: usize, actual: usize },
    #[error("duplicate item in answer key: {0}")]
    DuplicateAnswer(Item),
    #[error("answer {0} is not in the item pool")]
    AnswerNotInPool(Item),
    #[error("at least one attempt must be allowed")]
    NoAttempts,
    #[error("puzzle data malformed: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for PuzzleError {
    fn from(err: serde_json::Error) -> Self {
        PuzzleError::Malformed(err.to_string())
    }
}

/// The particle-emission collaborator failed to take a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("particle emitter unavailable")]
    Unavailable,
    #[error("particle emitter rejected request: {0}")]
    Rejected(String),
}

/// Settings file could not be read or parsed
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
