//! Errors surfaced to callers of the game service.

use crate::models::player::PlayerId;
use thiserror::Error;

/// Broad category of a [`GameError`], used by the HTTP layer to pick a status code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input: empty name, unknown move token, same player twice, etc.
    Validation,
    /// Referenced player does not exist.
    NotFound,
    /// Operation not allowed in the current session state.
    State,
}

/// Errors that can occur during player or game operations. Every error leaves state unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("Player name is required")]
    EmptyName,
    #[error("Invalid choice '{0}'. Use rock, paper, or scissors.")]
    InvalidMove(String),
    #[error("Player not found")]
    PlayerNotFound(PlayerId),
    #[error("A player cannot play against themselves")]
    SamePlayer,
    #[error("The CPU cannot be used as the opponent to predict")]
    CpuOpponent,
    #[error("The CPU is not playing in the current game")]
    NoCpuInGame,
    #[error("No active game. Start a game first.")]
    NoActiveGame,
    #[error("All rounds of this game have been played")]
    GameComplete,
    #[error("A game is already in progress")]
    GameInProgress,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::EmptyName
            | GameError::InvalidMove(_)
            | GameError::SamePlayer
            | GameError::CpuOpponent
            | GameError::NoCpuInGame => ErrorKind::Validation,
            GameError::PlayerNotFound(_) => ErrorKind::NotFound,
            GameError::NoActiveGame | GameError::GameComplete | GameError::GameInProgress => {
                ErrorKind::State
            }
        }
    }
}
