//! Integration tests for registration, stats, and leaderboard ordering.

use rps_leaderboard_web::{
    leaderboard, player_stats, record_choice, GameError, Move, PlayerId, PlayerStore,
    CPU_PLAYER_ID,
};

fn set_score(store: &mut PlayerStore, id: PlayerId, score: u32) {
    store.get_mut(id).unwrap().score = score;
}

#[test]
fn duplicate_names_get_distinct_ids() {
    let mut store = PlayerStore::new();
    let (first, created_first) = store.register("Sam", false).unwrap();
    let (second, created_second) = store.register("Sam", false).unwrap();
    assert!(created_first && created_second);
    assert_ne!(first, second);
    assert_eq!(store.len(), 3); // two Sams + CPU
}

#[test]
fn blank_name_is_rejected() {
    let mut store = PlayerStore::new();
    assert_eq!(store.register("   ", false), Err(GameError::EmptyName));
    assert_eq!(store.len(), 1);
}

#[test]
fn cpu_registration_is_idempotent() {
    let mut store = PlayerStore::new();
    let (id, created) = store.register("Robot", true).unwrap();
    assert_eq!(id, CPU_PLAYER_ID);
    assert!(!created);
    assert_eq!(store.len(), 1);
    assert!(store.is_cpu(id));
}

#[test]
fn score_view_sorts_descending_then_by_name() {
    let mut store = PlayerStore::new();
    store.clear();
    let (a, _) = store.register("A", false).unwrap();
    let (b, _) = store.register("b", false).unwrap();
    let (c, _) = store.register("C", false).unwrap();
    set_score(&mut store, a, 3);
    set_score(&mut store, b, 3);
    set_score(&mut store, c, 5);

    let board = leaderboard(&store);
    let by_score: Vec<&str> = board
        .by_score
        .iter()
        .filter(|e| !e.is_cpu)
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(by_score, ["C", "A", "b"]);
    assert_eq!(board.total_players, 4);
}

#[test]
fn name_view_is_case_insensitive() {
    let mut store = PlayerStore::new();
    for name in ["delta", "Bravo", "alpha", "Charlie"] {
        store.register(name, false).unwrap();
    }
    let board = leaderboard(&store);
    let names: Vec<&str> = board.by_name.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["alpha", "Bravo", "Charlie", "CPU", "delta"]);
}

#[test]
fn stats_report_choice_percentages() {
    let mut store = PlayerStore::new();
    let (id, _) = store.register("Ana", false).unwrap();

    let empty = player_stats(&store, id).unwrap();
    assert_eq!(empty.total_choices, 0);
    assert_eq!(empty.choice_percentages.rock, 0.0);

    let p = store.get_mut(id).unwrap();
    for mv in [Move::Rock, Move::Rock, Move::Paper] {
        record_choice(p, mv);
    }
    let stats = player_stats(&store, id).unwrap();
    assert_eq!(stats.total_choices, 3);
    assert_eq!(stats.choice_percentages.rock, 66.7);
    assert_eq!(stats.choice_percentages.paper, 33.3);
    assert_eq!(stats.choice_percentages.scissors, 0.0);
}

#[test]
fn stats_for_unknown_player() {
    let store = PlayerStore::new();
    let ghost = uuid::Uuid::new_v4();
    assert_eq!(
        player_stats(&store, ghost),
        Err(GameError::PlayerNotFound(ghost))
    );
}
