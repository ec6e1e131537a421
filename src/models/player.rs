//! Player record and its stats view.

use crate::models::moves::{Move, MoveCounts, MovePercentages, PatternKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use uuid::Uuid;

/// Unique identifier for a player (used in games and lookups).
pub type PlayerId = Uuid;

/// Well-known id of the CPU singleton.
pub const CPU_PLAYER_ID: PlayerId = Uuid::nil();

/// Display name given to the CPU singleton.
pub const CPU_PLAYER_NAME: &str = "CPU";

/// How many recent moves are kept for pattern lookahead.
pub const MOVE_SEQUENCE_CAPACITY: usize = 10;

/// Statistics view of a player (for API / display).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub id: PlayerId,
    pub name: String,
    pub is_cpu: bool,
    pub score: u32,
    pub games_won: u32,
    pub games_played: u32,
    pub choice_history: MoveCounts,
    pub choice_percentages: MovePercentages,
    pub total_choices: u32,
}

impl PlayerStats {
    pub fn from_player(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            is_cpu: p.is_cpu,
            score: p.score,
            games_won: p.games_won,
            games_played: p.games_played,
            choice_history: p.choice_history,
            choice_percentages: p.choice_history.percentages(),
            total_choices: p.total_choices(),
        }
    }
}

/// A registered player. Display names are not unique; `id` is.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub is_cpu: bool,
    /// Rounds won across all games.
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub games_won: u32,
    #[serde(default)]
    pub games_played: u32,
    /// How often each move was played. Sum equals rounds recorded.
    #[serde(default)]
    pub choice_history: MoveCounts,
    /// Last moves, oldest first, at most [`MOVE_SEQUENCE_CAPACITY`].
    #[serde(default)]
    pub move_sequence: VecDeque<Move>,
    /// For each two-move pattern, what the player played next.
    #[serde(default)]
    pub pattern_history: BTreeMap<PatternKey, MoveCounts>,
}

impl Player {
    /// Create a new human player with the given name. Other fields start at zero/empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_cpu: false,
            score: 0,
            games_won: 0,
            games_played: 0,
            choice_history: MoveCounts::default(),
            move_sequence: VecDeque::new(),
            pattern_history: BTreeMap::new(),
        }
    }

    /// The CPU singleton record.
    pub fn cpu() -> Self {
        Self {
            id: CPU_PLAYER_ID,
            is_cpu: true,
            ..Self::new(CPU_PLAYER_NAME)
        }
    }

    /// Current stats as a separate struct (for API responses).
    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from_player(self)
    }

    pub fn total_choices(&self) -> u32 {
        self.choice_history.total()
    }

    /// Pattern formed by the two most recent moves, if there are at least two.
    pub fn last_pattern(&self) -> Option<PatternKey> {
        let len = self.move_sequence.len();
        if len < 2 {
            return None;
        }
        Some(PatternKey(
            self.move_sequence[len - 2],
            self.move_sequence[len - 1],
        ))
    }

    /// Record a round won by this player.
    pub fn add_round_win(&mut self) {
        self.score += 1;
    }

    /// Record a game won by this player.
    pub fn add_game_win(&mut self) {
        self.games_won += 1;
    }

    /// Record that this player finished a game.
    pub fn add_game_played(&mut self) {
        self.games_played += 1;
    }

    /// Bring a record read from disk in line with the in-memory invariants.
    pub fn normalize(&mut self) {
        if self.is_cpu {
            self.choice_history = MoveCounts::default();
            self.move_sequence.clear();
            self.pattern_history.clear();
            return;
        }
        while self.move_sequence.len() > MOVE_SEQUENCE_CAPACITY {
            self.move_sequence.pop_front();
        }
    }
}
