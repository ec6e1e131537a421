//! Round resolution: start a game, play its ten rounds, settle the winner.

use crate::logic::recorder::record_choice;
use crate::models::{
    GameError, GameSession, Move, PlayerId, PlayerStore, RoundOutcome, RoundRecord,
    RoundSummary, ROUNDS_PER_GAME,
};

/// Who wins a single exchange.
pub fn resolve_round(choice1: Move, choice2: Move) -> RoundOutcome {
    if choice1 == choice2 {
        RoundOutcome::Tie
    } else if choice1.beats() == choice2 {
        RoundOutcome::Player1
    } else {
        RoundOutcome::Player2
    }
}

/// Start a new game between two registered, distinct players.
///
/// Resets round counters and history; keeps `previous_winner` from the last game.
pub fn start_game(
    session: &mut GameSession,
    players: &PlayerStore,
    player1: PlayerId,
    player2: PlayerId,
) -> Result<(), GameError> {
    if session.game_active {
        return Err(GameError::GameInProgress);
    }
    if player1 == player2 {
        return Err(GameError::SamePlayer);
    }
    players.get(player1)?;
    players.get(player2)?;

    *session = GameSession {
        player1: Some(player1),
        player2: Some(player2),
        game_active: true,
        previous_winner: session.previous_winner,
        ..GameSession::new()
    };
    log::info!("Game started: {} vs {}", player1, player2);
    Ok(())
}

/// Play one round of the active game.
///
/// Order: resolve, record both choices (CPU skipped), advance the round counter, credit the
/// round winner, append to history. After the last round the game is settled.
pub fn play_round(
    session: &mut GameSession,
    players: &mut PlayerStore,
    choice1: Move,
    choice2: Move,
) -> Result<RoundSummary, GameError> {
    if !session.game_active {
        return Err(GameError::NoActiveGame);
    }
    if session.current_round >= ROUNDS_PER_GAME {
        return Err(GameError::GameComplete);
    }
    let (id1, id2) = session.participants().ok_or(GameError::NoActiveGame)?;
    // Both must still exist before anything is mutated.
    players.get(id1)?;
    players.get(id2)?;

    let result = resolve_round(choice1, choice2);

    record_choice(players.get_mut(id1)?, choice1);
    record_choice(players.get_mut(id2)?, choice2);

    session.current_round += 1;

    match result {
        RoundOutcome::Player1 => {
            session.player1_round_wins += 1;
            players.get_mut(id1)?.add_round_win();
        }
        RoundOutcome::Player2 => {
            session.player2_round_wins += 1;
            players.get_mut(id2)?.add_round_win();
        }
        RoundOutcome::Tie => {}
    }

    let record = RoundRecord {
        round: session.current_round,
        player1_choice: choice1,
        player2_choice: choice2,
        result,
    };
    session.game_history.push(record.clone());

    let game_over = session.current_round >= ROUNDS_PER_GAME;
    let game_winner = if game_over {
        finish_game(session, players, id1, id2)?
    } else {
        None
    };

    Ok(RoundSummary {
        round: record,
        current_round: session.current_round,
        player1_round_wins: session.player1_round_wins,
        player2_round_wins: session.player2_round_wins,
        game_active: session.game_active,
        game_over,
        game_winner,
    })
}

/// Close the game: pick the strict-majority winner, update game counts and `previous_winner`.
fn finish_game(
    session: &mut GameSession,
    players: &mut PlayerStore,
    id1: PlayerId,
    id2: PlayerId,
) -> Result<Option<PlayerId>, GameError> {
    session.game_active = false;

    let winner = match session
        .player1_round_wins
        .cmp(&session.player2_round_wins)
    {
        std::cmp::Ordering::Greater => Some(id1),
        std::cmp::Ordering::Less => Some(id2),
        std::cmp::Ordering::Equal => None,
    };

    if let Some(w) = winner {
        players.get_mut(w)?.add_game_win();
    }
    players.get_mut(id1)?.add_game_played();
    players.get_mut(id2)?.add_game_played();

    session.previous_winner = winner.filter(|w| !players.is_cpu(*w));

    match winner {
        Some(w) => log::info!(
            "Game over: {} won {}-{}",
            w,
            session.player1_round_wins.max(session.player2_round_wins),
            session.player1_round_wins.min(session.player2_round_wins)
        ),
        None => log::info!(
            "Game over: tied {}-{}",
            session.player1_round_wins,
            session.player2_round_wins
        ),
    }

    Ok(winner)
}
