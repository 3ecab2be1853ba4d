#![allow(dead_code)]

use game_core::{EngineConfig, FixedClock, LearningEngine, ProgressEvent, ProgressEventHandler};
use game_persistence::MemoryStore;
use game_types::WordPair;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;

pub const NOW_MILLIS: i64 = 1_760_000_000_000;
pub const DAY_MILLIS: i64 = 86_400_000;

pub type TestEngine = LearningEngine<MemoryStore, StdRng, FixedClock>;

/// Creates an engine over an empty in-memory store with a fixed clock and seed
pub fn create_test_engine(seed: u64) -> TestEngine {
    create_engine_with_store(MemoryStore::new(), seed)
}

/// Creates an engine over an existing store (e.g. one pre-seeded with old documents)
pub fn create_engine_with_store(store: MemoryStore, seed: u64) -> TestEngine {
    LearningEngine::with_parts(
        store,
        StdRng::seed_from_u64(seed),
        FixedClock::from_millis(NOW_MILLIS),
        EngineConfig::default(),
    )
}

/// Creates `count` distinct word pairs
pub fn create_word_pairs(count: usize) -> Vec<WordPair> {
    (0..count)
        .map(|i| WordPair {
            source_text: format!("từ {}", i),
            target_text: format!("词 {}", i),
        })
        .collect()
}

/// A small Vietnamese/Chinese list with realistic entries
pub fn create_sample_vocabulary() -> Vec<WordPair> {
    [
        ("xin chào", "你好"),
        ("cảm ơn", "谢谢"),
        ("con mèo", "猫"),
        ("con chó", "狗"),
        ("nước", "水"),
        ("trường học", "学校"),
        ("bạn bè", "朋友"),
        ("sách", "书"),
    ]
    .iter()
    .filter_map(|(vi, zh)| WordPair::new(vi, zh))
    .collect()
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Rc<RefCell<Vec<ProgressEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<ProgressEvent> {
        self.events.borrow().clone()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&ProgressEvent) -> bool) -> bool {
        self.events.borrow().iter().any(check_fn)
    }
}

impl ProgressEventHandler for EventCollector {
    fn handle_event(&mut self, event: &ProgressEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
