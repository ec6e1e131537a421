//! Data structures for the leaderboard: moves, players, the game session, errors.

mod error;
mod game;
mod moves;
mod player;
mod store;

pub use error::{ErrorKind, GameError};
pub use game::{GameSession, RoundOutcome, RoundRecord, RoundSummary, ROUNDS_PER_GAME};
pub use moves::{Move, MoveCounts, MovePercentages, PatternKey};
pub use player::{
    Player, PlayerId, PlayerStats, CPU_PLAYER_ID, CPU_PLAYER_NAME, MOVE_SEQUENCE_CAPACITY,
};
pub use store::PlayerStore;
