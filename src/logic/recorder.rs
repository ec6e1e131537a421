//! Choice history: fold a completed move into a player's record.

use crate::models::{Move, Player, MOVE_SEQUENCE_CAPACITY};

/// Record one completed move for `player`. No-op for the CPU.
///
/// 1. Bump the overall count for `choice`.
/// 2. If at least two moves are already known, count `choice` as the follow-up of that pair.
/// 3. Push `choice` onto the move sequence, evicting the oldest past capacity.
///
/// Call once per player per round, after any prediction for that round has been made.
pub fn record_choice(player: &mut Player, choice: Move) {
    if player.is_cpu {
        return;
    }

    player.choice_history.increment(choice);

    if let Some(key) = player.last_pattern() {
        player
            .pattern_history
            .entry(key)
            .or_default()
            .increment(choice);
    }

    player.move_sequence.push_back(choice);
    if player.move_sequence.len() > MOVE_SEQUENCE_CAPACITY {
        player.move_sequence.pop_front();
    }
}
