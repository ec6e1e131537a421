//! Leaderboard views and per-player stats.

use crate::models::{GameError, MoveCounts, Player, PlayerId, PlayerStats, PlayerStore};
use serde::{Deserialize, Serialize};

/// One row of the leaderboard.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub games_won: u32,
    pub games_played: u32,
    pub is_cpu: bool,
    pub choice_history: MoveCounts,
}

impl LeaderboardEntry {
    pub fn from_player(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            score: p.score,
            games_won: p.games_won,
            games_played: p.games_played,
            is_cpu: p.is_cpu,
            choice_history: p.choice_history,
        }
    }
}

/// Every player, twice: alphabetically and by score.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Case-insensitive name order.
    pub by_name: Vec<LeaderboardEntry>,
    /// Score descending, then name.
    pub by_score: Vec<LeaderboardEntry>,
    pub total_players: usize,
}

/// Build both sorted views of the store.
pub fn leaderboard(players: &PlayerStore) -> Leaderboard {
    let mut by_name: Vec<LeaderboardEntry> =
        players.players().map(LeaderboardEntry::from_player).collect();
    // Exact name and id only settle otherwise-equal rows so the output is deterministic.
    by_name.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut by_score = by_name.clone();
    by_score.sort_by(|a, b| b.score.cmp(&a.score));

    let total_players = by_name.len();
    Leaderboard {
        by_name,
        by_score,
        total_players,
    }
}

/// Stats for one player.
pub fn player_stats(players: &PlayerStore, id: PlayerId) -> Result<PlayerStats, GameError> {
    players.get(id).map(Player::stats)
}
