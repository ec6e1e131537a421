//! Strategic predictor: pick a CPU move from an opponent's stored history.
//!
//! Strategies, first match wins:
//! 1. `learning`: fewer than 5 recorded moves, play uniformly at random.
//! 2. `pattern`: the last two moves have been followed by one move more than half the time
//!    (seen at least 3 times), counter that move.
//! 3. `frequency` / `random_variation`: one move makes up more than 40% of the history,
//!    counter it, except 15% of the time play at random instead.
//! 4. `weighted`: sample with extra weight on moves that beat what the opponent plays often.
//!
//! The predictor only reads the record; it never sees the round currently being played.

use crate::models::{Move, MovePercentages, PatternKey, Player};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Recorded moves needed before any analysis.
pub const MIN_HISTORY: u32 = 5;
/// Times a pattern must have been seen before it is trusted.
pub const MIN_PATTERN_OCCURRENCES: u32 = 3;
/// Pattern share that must be exceeded to act on it.
pub const PATTERN_CONFIDENCE_THRESHOLD: f64 = 0.5;
/// Move share that must be exceeded to counter it.
pub const FREQUENCY_CONFIDENCE_THRESHOLD: f64 = 0.4;
/// Chance of ignoring the frequency counter and playing at random.
pub const RANDOM_VARIATION_RATE: f64 = 0.15;

/// Which rule produced the move.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Learning,
    Pattern,
    Frequency,
    RandomVariation,
    Weighted,
}

/// The CPU's chosen move plus the reasoning behind it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub choice: Move,
    pub strategy_used: Strategy,
    /// 0..=100 for analysed strategies; the number of known moves while learning.
    pub confidence: u32,
    pub analysis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_opponent_move: Option<Move>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_occurrences: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_tendencies: Option<MovePercentages>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_choices_analyzed: Option<u32>,
}

impl Prediction {
    fn new(choice: Move, strategy_used: Strategy, confidence: u32, analysis: String) -> Self {
        Self {
            choice,
            strategy_used,
            confidence,
            analysis,
            predicted_opponent_move: None,
            pattern_occurrences: None,
            player_tendencies: None,
            total_choices_analyzed: None,
        }
    }
}

/// Choose a counter-move against `opponent` using only its stored history.
pub fn predict<R: Rng + ?Sized>(opponent: &Player, rng: &mut R) -> Prediction {
    let total = opponent.total_choices();

    if total < MIN_HISTORY {
        return Prediction::new(
            random_move(rng),
            Strategy::Learning,
            total,
            format!("Still learning ({total}/{MIN_HISTORY} moves)"),
        );
    }

    if let Some(prediction) = pattern_prediction(opponent) {
        return prediction;
    }

    let history = opponent.choice_history;
    let tendencies = history.percentages();
    let (predicted, count) = history.most_frequent();
    let share = count as f64 / total as f64;

    if share > FREQUENCY_CONFIDENCE_THRESHOLD {
        let (choice, strategy) = if rng.gen_bool(RANDOM_VARIATION_RATE) {
            (random_move(rng), Strategy::RandomVariation)
        } else {
            (predicted.counter(), Strategy::Frequency)
        };
        let mut prediction = Prediction::new(
            choice,
            strategy,
            percent(share),
            format!("Player favors {predicted} ({:.1}%)", share * 100.0),
        );
        prediction.predicted_opponent_move = Some(predicted);
        prediction.player_tendencies = Some(tendencies);
        prediction.total_choices_analyzed = Some(total);
        return prediction;
    }

    let weights = counter_weights(opponent);
    let choice = match WeightedIndex::new(weights) {
        Ok(dist) => Move::ALL[dist.sample(rng)],
        Err(_) => random_move(rng),
    };
    let max_weight = weights.iter().copied().fold(0.0, f64::max);
    let mut prediction = Prediction::new(
        choice,
        Strategy::Weighted,
        percent(max_weight),
        "No strong pattern detected, using weighted random".to_string(),
    );
    prediction.player_tendencies = Some(tendencies);
    prediction
}

/// Pattern strategy, if the last two moves have a trusted, dominant follow-up.
fn pattern_prediction(opponent: &Player) -> Option<Prediction> {
    let key: PatternKey = opponent.last_pattern()?;
    let followups = opponent.pattern_history.get(&key)?;
    let occurrences = followups.total();
    if occurrences < MIN_PATTERN_OCCURRENCES {
        return None;
    }
    let (predicted, count) = followups.most_frequent();
    let confidence = count as f64 / occurrences as f64;
    if confidence <= PATTERN_CONFIDENCE_THRESHOLD {
        return None;
    }
    let mut prediction = Prediction::new(
        predicted.counter(),
        Strategy::Pattern,
        percent(confidence),
        format!("Detected pattern: after ({key}), player picks {predicted}"),
    );
    prediction.predicted_opponent_move = Some(predicted);
    prediction.pattern_occurrences = Some(occurrences);
    Some(prediction)
}

/// Normalized sampling weight per move in [`Move::ALL`] order.
///
/// Each move gets `1 + share of the move it beats`, so moves that punish the opponent's
/// habits are slightly favoured.
pub fn counter_weights(opponent: &Player) -> [f64; 3] {
    let history = opponent.choice_history;
    let total = history.total().max(1) as f64;
    let raw = Move::ALL.map(|mv| 1.0 + history.get(mv.beats()) as f64 / total);
    let sum: f64 = raw.iter().sum();
    raw.map(|w| w / sum)
}

fn random_move<R: Rng + ?Sized>(rng: &mut R) -> Move {
    *Move::ALL.choose(rng).unwrap_or(&Move::Rock)
}

fn percent(ratio: f64) -> u32 {
    (ratio * 100.0).round() as u32
}
