//! Engine errors.

use crate::model::PlayerId;
use thiserror::Error;

/// Broad class of a [`GameError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input: the request can never succeed as written
    Validation,
    /// Well-formed request that the match cannot accept in its current state
    IllegalAction,
}

/// Errors from match setup and the reducer.
///
/// A failed call never changes the match it was given.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("At least 2 players are required, got {0}")]
    NotEnoughPlayers(usize),

    #[error("Player listed twice: {0}")]
    DuplicatePlayer(PlayerId),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid player name: {0:?}")]
    InvalidName(String),

    #[error("Invalid throw: {base} x{multiplier}")]
    InvalidThrow { base: u32, multiplier: u32 },

    #[error("Game is already over")]
    GameOver,

    #[error("No darts thrown this turn")]
    NothingToUndo,

    #[error("Score adjustment is only supported in X01")]
    AdjustNotSupported,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::NotEnoughPlayers(_)
            | GameError::DuplicatePlayer(_)
            | GameError::PlayerNotFound(_)
            | GameError::InvalidSettings(_)
            | GameError::InvalidName(_)
            | GameError::InvalidThrow { .. } => ErrorKind::Validation,
            GameError::GameOver | GameError::NothingToUndo | GameError::AdjustNotSupported => {
                ErrorKind::IllegalAction
            }
        }
    }
}
