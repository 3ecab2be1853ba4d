use game_types::{
    GameHistoryEntry, HighScores, PlayerState, StoreError, VocabStats, WordPair,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::overlay::{high_scores_from_value, player_state_from_value, vocab_stats_from_value};
use crate::store::DocumentStore;

pub const VOCAB_STATS_KEY: &str = "vocab_quest_vocab_stats";
pub const PLAYER_STATE_KEY: &str = "vocab_quest_player_state";
pub const HIGH_SCORES_KEY: &str = "vocab_quest_highscores";
pub const RESULTS_LOG_KEY: &str = "vocab_quest_results";
pub const VOCABULARY_KEY: &str = "vocab_quest_vocabulary";

/// Typed access to the persisted documents.
///
/// Reads never fail: a missing, unreadable or unparsable document is reported and replaced
/// by its default. Writes return the store error so callers decide how loudly to report it.
pub struct StateRepository<S> {
    store: S,
}

impl<S: DocumentStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read '{}', treating as absent: {}", key, e);
                None
            }
        }
    }

    fn read_value(&self, key: &str) -> Option<Value> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Document '{}' is corrupt, treating as absent: {}", key, e);
                None
            }
        }
    }

    fn read_document<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!("Document '{}' is corrupt, treating as absent: {}", key, e);
                None
            }
        }
    }

    fn write_document<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        document: &T,
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(document)?;
        self.store.set(key, &raw)
    }

    pub fn load_vocab_stats(&self) -> VocabStats {
        self.read_value(VOCAB_STATS_KEY)
            .map(vocab_stats_from_value)
            .unwrap_or_default()
    }

    pub fn save_vocab_stats(&mut self, stats: &VocabStats) -> Result<(), StoreError> {
        self.write_document(VOCAB_STATS_KEY, stats)
    }

    pub fn clear_vocab_stats(&mut self) -> Result<(), StoreError> {
        self.store.remove(VOCAB_STATS_KEY)
    }

    pub fn load_player_state(&self) -> PlayerState {
        self.read_value(PLAYER_STATE_KEY)
            .map(player_state_from_value)
            .unwrap_or_default()
    }

    pub fn save_player_state(&mut self, state: &PlayerState) -> Result<(), StoreError> {
        self.write_document(PLAYER_STATE_KEY, state)
    }

    pub fn load_high_scores(&self) -> HighScores {
        self.read_value(HIGH_SCORES_KEY)
            .map(high_scores_from_value)
            .unwrap_or_default()
    }

    pub fn save_high_scores(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        self.write_document(HIGH_SCORES_KEY, scores)
    }

    /// Results log, newest first.
    pub fn load_history(&self) -> Vec<GameHistoryEntry> {
        self.read_document(RESULTS_LOG_KEY).unwrap_or_default()
    }

    pub fn save_history(&mut self, entries: &[GameHistoryEntry]) -> Result<(), StoreError> {
        self.write_document(RESULTS_LOG_KEY, entries)
    }

    /// The imported word list, if one was saved.
    pub fn load_vocabulary(&self) -> Option<Vec<WordPair>> {
        self.read_document(VOCABULARY_KEY)
    }

    pub fn save_vocabulary(&mut self, pairs: &[WordPair]) -> Result<(), StoreError> {
        self.write_document(VOCABULARY_KEY, pairs)
    }

    pub fn clear_vocabulary(&mut self) -> Result<(), StoreError> {
        self.store.remove(VOCABULARY_KEY)
    }
}
