//! Game business logic: history recording, prediction, rounds, leaderboard.

mod predictor;
mod recorder;
mod round;
mod standings;

pub use predictor::{
    counter_weights, predict, Prediction, Strategy, FREQUENCY_CONFIDENCE_THRESHOLD, MIN_HISTORY,
    MIN_PATTERN_OCCURRENCES, PATTERN_CONFIDENCE_THRESHOLD, RANDOM_VARIATION_RATE,
};
pub use recorder::record_choice;
pub use round::{play_round, resolve_round, start_game};
pub use standings::{leaderboard, player_stats, Leaderboard, LeaderboardEntry};
