//! Integration tests for the game service: full games, CPU rounds, reset, persistence.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rps_leaderboard_web::{
    Config, ErrorKind, GameError, GameService, Move, Storage, Strategy, CPU_PLAYER_ID,
    ROUNDS_PER_GAME,
};
use std::fs;

#[test]
fn cpu_choice_reads_only_prior_rounds() {
    let mut svc = GameService::in_memory();
    let ana = svc.register("Ana", false).unwrap().id;
    svc.start_game(ana, CPU_PLAYER_ID).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    for round in 0..ROUNDS_PER_GAME {
        let before = svc.stats(ana).unwrap().total_choices;
        assert_eq!(before, round);
        let prediction = svc.cpu_choice(ana, &mut rng).unwrap();
        if round < 5 {
            assert_eq!(prediction.strategy_used, Strategy::Learning);
            assert_eq!(prediction.confidence, round);
        }
        // predicting does not record anything
        assert_eq!(svc.stats(ana).unwrap().total_choices, before);
        svc.play_round(Move::Rock, prediction.choice).unwrap();
    }
    assert!(!svc.game_state().game_active);
}

#[test]
fn play_cpu_round_predicts_then_records() {
    let mut svc = GameService::in_memory();
    let ana = svc.register("Ana", false).unwrap().id;
    svc.start_game(CPU_PLAYER_ID, ana).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let mut last = None;
    for _ in 0..ROUNDS_PER_GAME {
        last = Some(svc.play_cpu_round(Move::Scissors, &mut rng).unwrap());
    }
    let last = last.unwrap();
    assert!(last.summary.game_over);
    // ten scissors: the pattern (scissors, scissors) -> scissors is learned before the end
    assert_eq!(last.cpu.strategy_used, Strategy::Pattern);
    assert_eq!(last.cpu.choice, Move::Rock);
    assert_eq!(last.summary.round.player1_choice, Move::Rock);
    assert_eq!(last.summary.round.player2_choice, Move::Scissors);

    let stats = svc.stats(ana).unwrap();
    assert_eq!(stats.total_choices, 10);
    assert_eq!(stats.choice_history.scissors, 10);
    assert_eq!(svc.stats(CPU_PLAYER_ID).unwrap().total_choices, 0);
}

#[test]
fn play_cpu_round_needs_the_cpu_in_the_game() {
    let mut svc = GameService::in_memory();
    let ana = svc.register("Ana", false).unwrap().id;
    let ben = svc.register("Ben", false).unwrap().id;
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(
        svc.play_cpu_round(Move::Rock, &mut rng).unwrap_err(),
        GameError::NoActiveGame
    );
    svc.start_game(ana, ben).unwrap();
    let err = svc.play_cpu_round(Move::Rock, &mut rng).unwrap_err();
    assert_eq!(err, GameError::NoCpuInGame);
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(svc.game_state().current_round, 0);
}

#[test]
fn cpu_choice_rejects_cpu_and_unknown_opponents() {
    let svc = GameService::in_memory();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        svc.cpu_choice(CPU_PLAYER_ID, &mut rng),
        Err(GameError::CpuOpponent)
    );
    let ghost = uuid::Uuid::new_v4();
    let err = svc.cpu_choice(ghost, &mut rng).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn invalid_moves_are_rejected_before_any_state_changes() {
    assert_eq!(" ROCK ".parse::<Move>(), Ok(Move::Rock));
    assert_eq!("Scissors".parse::<Move>(), Ok(Move::Scissors));
    let err = "lizard".parse::<Move>().unwrap_err();
    assert_eq!(err, GameError::InvalidMove("lizard".to_string()));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("lizard"));
}

#[test]
fn state_errors_are_classified() {
    let mut svc = GameService::in_memory();
    let err = svc.play_round(Move::Rock, Move::Rock).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
}

#[test]
fn reset_clears_players_and_session() {
    let mut svc = GameService::in_memory();
    let ana = svc.register("Ana", false).unwrap().id;
    svc.start_game(ana, CPU_PLAYER_ID).unwrap();
    svc.play_round(Move::Rock, Move::Paper).unwrap();

    svc.reset();

    assert_eq!(svc.players().len(), 1);
    assert!(svc.players().contains(CPU_PLAYER_ID));
    assert!(!svc.game_state().game_active);
    assert!(svc.game_state().game_history.is_empty());
    assert_eq!(svc.leaderboard().total_players, 1);
    assert_eq!(svc.stats(ana).unwrap_err(), GameError::PlayerNotFound(ana));
}

#[test]
fn registering_cpu_returns_singleton() {
    let mut svc = GameService::in_memory();
    let reg = svc.register("Another CPU", true).unwrap();
    assert_eq!(reg.id, CPU_PLAYER_ID);
    assert!(!reg.created);
    assert!(reg.stats.is_cpu);
    assert_eq!(svc.players().len(), 1);
}

#[test]
fn service_persists_between_instances() {
    let dir = std::env::temp_dir().join(format!("rps-service-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    let storage = Storage::new(dir.join("data.json"), dir.join("backup.json"));

    let ana = {
        let mut svc = GameService::with_storage(storage.clone());
        let ana = svc.register("Ana", false).unwrap().id;
        svc.start_game(ana, CPU_PLAYER_ID).unwrap();
        for _ in 0..ROUNDS_PER_GAME {
            svc.play_round(Move::Paper, Move::Rock).unwrap();
        }
        ana
    };

    let svc = GameService::with_storage(storage);
    let stats = svc.stats(ana).unwrap();
    assert_eq!(stats.score, 10);
    assert_eq!(stats.games_won, 1);
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.choice_history.paper, 10);
    assert!(!svc.game_state().game_active);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn config_defaults_and_overrides() {
    let defaults = Config::from_lookup(|_| None);
    assert_eq!(defaults.host, "0.0.0.0");
    assert_eq!(defaults.port, 8080);
    assert_eq!(defaults.data_file, "leaderboard_data.json");
    assert_eq!(defaults.backup_file, "leaderboard_data.backup.json");

    let custom = Config::from_lookup(|key| match key {
        "PORT" => Some("9090".to_string()),
        "RPS_DATA_FILE" => Some("/tmp/rps.json".to_string()),
        _ => None,
    });
    assert_eq!(custom.port, 9090);
    assert_eq!(custom.data_file, "/tmp/rps.json");
    assert_eq!(custom.storage().data_path(), std::path::Path::new("/tmp/rps.json"));

    let bad_port = Config::from_lookup(|key| (key == "PORT").then(|| "eighty".to_string()));
    assert_eq!(bad_port.port, 8080);
}
