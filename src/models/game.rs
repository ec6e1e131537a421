//! GameSession, RoundRecord, and RoundOutcome for a best-of-10 match.

use crate::models::moves::Move;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Number of rounds in every game.
pub const ROUNDS_PER_GAME: u32 = 10;

/// Who took a single round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Player1,
    Player2,
    Tie,
}

/// One completed round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round: u32,
    pub player1_choice: Move,
    pub player2_choice: Move,
    pub result: RoundOutcome,
}

/// The single game session. Idle until started, active for ten rounds, then idle again.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub player1: Option<PlayerId>,
    pub player2: Option<PlayerId>,
    pub player1_round_wins: u32,
    pub player2_round_wins: u32,
    pub current_round: u32,
    pub game_active: bool,
    /// Most recent human game winner. Cleared when the CPU wins or a game ties.
    pub previous_winner: Option<PlayerId>,
    pub game_history: Vec<RoundRecord>,
}

impl GameSession {
    /// Idle session with no participants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Both participants, if a game has been started.
    pub fn participants(&self) -> Option<(PlayerId, PlayerId)> {
        self.player1.zip(self.player2)
    }
}

/// What a caller gets back from playing one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: RoundRecord,
    pub current_round: u32,
    pub player1_round_wins: u32,
    pub player2_round_wins: u32,
    pub game_active: bool,
    pub game_over: bool,
    /// Set only when the game just ended with a strict majority.
    pub game_winner: Option<PlayerId>,
}
