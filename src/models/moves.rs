//! Move, per-move counters, and the two-move pattern key.

use crate::models::error::GameError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the three hand shapes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// All moves, in the order used for tie-breaking.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move this one defeats.
    pub fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// The move that defeats this one.
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(GameError::InvalidMove(s.to_string())),
        }
    }
}

/// Occurrence count per move. Used for a player's overall choice history and for each
/// pattern's "what came next" counter.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveCounts {
    #[serde(default)]
    pub rock: u32,
    #[serde(default)]
    pub paper: u32,
    #[serde(default)]
    pub scissors: u32,
}

impl MoveCounts {
    pub fn get(&self, mv: Move) -> u32 {
        match mv {
            Move::Rock => self.rock,
            Move::Paper => self.paper,
            Move::Scissors => self.scissors,
        }
    }

    pub fn increment(&mut self, mv: Move) {
        match mv {
            Move::Rock => self.rock += 1,
            Move::Paper => self.paper += 1,
            Move::Scissors => self.scissors += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.rock + self.paper + self.scissors
    }

    /// Most frequent move and its count. Ties go to the earlier move in [`Move::ALL`].
    pub fn most_frequent(&self) -> (Move, u32) {
        let mut best = (Move::Rock, self.rock);
        for mv in [Move::Paper, Move::Scissors] {
            let count = self.get(mv);
            if count > best.1 {
                best = (mv, count);
            }
        }
        best
    }

    /// Share of each move in percent, rounded to one decimal. All zero when empty.
    pub fn percentages(&self) -> MovePercentages {
        let total = self.total();
        if total == 0 {
            return MovePercentages::default();
        }
        let pct = |n: u32| (n as f64 / total as f64 * 1000.0).round() / 10.0;
        MovePercentages {
            rock: pct(self.rock),
            paper: pct(self.paper),
            scissors: pct(self.scissors),
        }
    }
}

/// Per-move percentages (0.0..=100.0) for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MovePercentages {
    pub rock: f64,
    pub paper: f64,
    pub scissors: f64,
}

/// The ordered pair of a player's two most recent moves (older first).
///
/// Stored as a JSON object key in the form `"rock,paper"`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PatternKey(pub Move, pub Move);

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

impl FromStr for PatternKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, second) = s
            .split_once(',')
            .ok_or_else(|| GameError::InvalidMove(s.to_string()))?;
        Ok(PatternKey(first.parse()?, second.parse()?))
    }
}

impl Serialize for PatternKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PatternKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
