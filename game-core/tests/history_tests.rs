mod common;

use common::*;
use game_core::{EngineConfig, FixedClock, LearningEngine};
use game_persistence::repositories::RESULTS_LOG_KEY;
use game_persistence::{DocumentStore, MemoryStore};
use game_types::{GameHistoryEntry, GameName};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn entry(score: i64) -> GameHistoryEntry {
    GameHistoryEntry {
        timestamp: format!("entry {}", score),
        game: GameName::Quiz,
        score,
        correct_count: None,
        wrong_count: None,
    }
}

#[test]
fn test_log_keeps_newest_hundred() {
    let mut engine = create_test_engine(1);

    for score in 0..105 {
        engine.append_history(entry(score));
    }

    let history = engine.history();
    assert_eq!(history.len(), 100);
    assert_eq!(history.first().map(|e| e.score), Some(104));
    assert_eq!(history.last().map(|e| e.score), Some(5));
    assert!(history.windows(2).all(|w| w[0].score == w[1].score + 1));
}

#[test]
fn test_settlements_are_logged_newest_first() {
    let mut engine = create_test_engine(1);

    engine.settle(GameName::Match, 10, None, None);
    engine.settle(GameName::Tower, 20, None, None);
    engine.settle(GameName::Quiz, 30, Some(3), Some(0));

    let games: Vec<GameName> = engine.history().iter().map(|e| e.game).collect();
    assert_eq!(games, vec![GameName::Quiz, GameName::Tower, GameName::Match]);
}

#[test]
fn test_duplicate_entries_are_kept() {
    let mut engine = create_test_engine(1);
    engine.append_history(entry(7));
    engine.append_history(entry(7));
    assert_eq!(engine.history().len(), 2);
}

#[test]
fn test_corrupt_log_starts_over() {
    let mut store = MemoryStore::new();
    store.set(RESULTS_LOG_KEY, r#"[{"game": "chess"}]"#).unwrap();
    let mut engine = create_engine_with_store(store, 1);

    assert!(engine.history().is_empty());
    engine.append_history(entry(1));
    assert_eq!(engine.history(), vec![entry(1)]);
}

#[test]
fn test_custom_history_limit() {
    let config = EngineConfig {
        history_limit: 3,
        ..EngineConfig::default()
    };
    let mut engine = LearningEngine::with_parts(
        MemoryStore::new(),
        StdRng::seed_from_u64(1),
        FixedClock::from_millis(NOW_MILLIS),
        config,
    );

    for score in 0..5 {
        engine.append_history(entry(score));
    }

    let scores: Vec<i64> = engine.history().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![4, 3, 2]);
}
