//! Rock-paper-scissors leaderboard web app: library with models, game logic, persistence.

pub mod config;
pub mod logic;
pub mod models;
pub mod service;
pub mod storage;

pub use config::Config;
pub use logic::{
    counter_weights, leaderboard, play_round, player_stats, predict, record_choice,
    resolve_round, start_game, Leaderboard, LeaderboardEntry, Prediction, Strategy,
};
pub use models::{
    ErrorKind, GameError, GameSession, Move, MoveCounts, MovePercentages, PatternKey, Player,
    PlayerId, PlayerStats, PlayerStore, RoundOutcome, RoundRecord, RoundSummary, CPU_PLAYER_ID,
    CPU_PLAYER_NAME, MOVE_SEQUENCE_CAPACITY, ROUNDS_PER_GAME,
};
pub use service::{CpuRound, GameService, Registration};
pub use storage::{Storage, StorageError};
