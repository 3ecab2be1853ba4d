use chrono::Local;
use game_persistence::{DocumentStore, StateRepository};
use game_types::{
    GameHistoryEntry, GameName, HighScores, PlayerState, Settlement, StoreError, VocabStat,
    VocabStats, WordPair,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write;
use tracing::{debug, error, info, warn};

use crate::{
    Clock, CoinCalculator, Document, EngineConfig, ProgressEvent, ProgressEventBus,
    ProgressEventHandler, SystemClock, VocabTracker, WordSelector,
};

/// Single-player progression engine: word selection, answer tracking and round settlement.
///
/// Every operation runs to completion and never fails. Unreadable documents load as their
/// defaults and failed writes are logged (and published as
/// [`ProgressEvent::StorageWriteFailed`]) while the in-memory result is still returned.
pub struct LearningEngine<S, R = StdRng, C = SystemClock> {
    repository: StateRepository<S>,
    rng: R,
    clock: C,
    config: EngineConfig,
    event_bus: ProgressEventBus,
}

impl<S: DocumentStore> LearningEngine<S> {
    /// Production setup: entropy-seeded random source and the system clock.
    pub fn new(store: S) -> Self {
        Self::with_parts(
            store,
            StdRng::from_entropy(),
            SystemClock,
            EngineConfig::default(),
        )
    }

    /// Reproducible random draws with the system clock.
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self::with_parts(
            store,
            StdRng::seed_from_u64(seed),
            SystemClock,
            EngineConfig::default(),
        )
    }
}

impl<S: DocumentStore, R: Rng, C: Clock> LearningEngine<S, R, C> {
    pub fn with_parts(store: S, rng: R, clock: C, config: EngineConfig) -> Self {
        Self {
            repository: StateRepository::new(store),
            rng,
            clock,
            config,
            event_bus: ProgressEventBus::new(),
        }
    }

    pub fn repository(&self) -> &StateRepository<S> {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut StateRepository<S> {
        &mut self.repository
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn add_handler(&mut self, handler: Box<dyn ProgressEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    fn report_write(&mut self, document: Document, result: Result<(), StoreError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save {:?}: {}", document, e);
                self.event_bus.publish(ProgressEvent::StorageWriteFailed {
                    document,
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    // --- Vocabulary performance ---

    /// Record one answer for `word_key` and persist the whole stats document.
    pub fn record(&mut self, word_key: &str, is_correct: bool) -> VocabStat {
        let mut stats = self.repository.load_vocab_stats();
        let stat = VocabTracker::apply(&mut stats, word_key, is_correct, self.clock.now_millis());
        debug!(
            "Recorded {} answer for '{}': {:?}",
            if is_correct { "correct" } else { "wrong" },
            word_key,
            stat
        );

        let saved = self.repository.save_vocab_stats(&stats);
        self.report_write(Document::VocabStats, saved);

        self.event_bus.publish(ProgressEvent::AnswerRecorded {
            word_key: word_key.to_string(),
            is_correct,
            stat,
        });
        stat
    }

    pub fn vocab_stats(&self) -> VocabStats {
        self.repository.load_vocab_stats()
    }

    pub fn clear_vocab_stats(&mut self) {
        let cleared = self.repository.clear_vocab_stats();
        if self.report_write(Document::VocabStats, cleared) {
            info!("Cleared vocabulary statistics");
        }
    }

    // --- Selection ---

    /// Pick `count` pairs for a session, biased toward weak and stale words.
    pub fn select(&mut self, pairs: &[WordPair], count: usize) -> Vec<WordPair> {
        let selector = WordSelector::new(self.clock.now_millis())
            .with_unseen_days(self.config.unseen_days_since_correct);

        let stats = if pairs.len() > count {
            self.repository.load_vocab_stats()
        } else {
            VocabStats::new()
        };

        let chosen = selector.select(pairs, count, &stats, &mut self.rng);
        debug!("Selected {} of {} word pairs", chosen.len(), pairs.len());
        chosen
    }

    // --- Settlement ---

    /// Convert a finished round's score into coins, update records and log the round.
    pub fn settle(
        &mut self,
        game: GameName,
        score: i64,
        correct_count: Option<u32>,
        wrong_count: Option<u32>,
    ) -> Settlement {
        let mut player = self.repository.load_player_state();
        let mut high_scores = self.repository.load_high_scores();

        let previous = high_scores.get(game);
        if high_scores.submit(game, score) {
            let saved = self.repository.save_high_scores(&high_scores);
            if self.report_write(Document::HighScores, saved) {
                info!("New {} high score: {} (was {})", game, score, previous);
            }
            self.event_bus.publish(ProgressEvent::HighScoreBeaten {
                game,
                previous,
                score,
            });
        }

        let breakdown =
            CoinCalculator::breakdown(game, score, &player, &high_scores, &mut self.rng);
        debug!("Coin breakdown for {} score {}: {:?}", game, score, breakdown);

        player.coins += breakdown.coins_earned;
        let saved = self.repository.save_player_state(&player);
        self.report_write(Document::PlayerState, saved);

        let entry = GameHistoryEntry {
            timestamp: self.display_time(),
            game,
            score,
            correct_count,
            wrong_count,
        };
        self.append_history(entry.clone());

        info!(
            "Settled {} round: score {}, earned {} coins (balance {})",
            game, score, breakdown.coins_earned, player.coins
        );

        let settlement = Settlement {
            entry,
            coins_earned: breakdown.coins_earned,
        };
        self.event_bus.publish(ProgressEvent::RoundSettled {
            settlement: settlement.clone(),
            siphon_triggered: breakdown.siphon_triggered,
        });
        settlement
    }

    fn display_time(&self) -> String {
        let now = self.clock.now();
        let mut formatted = String::new();
        let local = now.with_timezone(&Local);
        if write!(formatted, "{}", local.format(&self.config.timestamp_format)).is_err() {
            warn!(
                "Invalid timestamp format '{}', falling back to RFC 3339",
                self.config.timestamp_format
            );
            formatted = local.to_rfc3339();
        }
        formatted
    }

    // --- Player state ---

    pub fn load_player_state(&self) -> PlayerState {
        self.repository.load_player_state()
    }

    pub fn save_player_state(&mut self, state: &PlayerState) {
        let saved = self.repository.save_player_state(state);
        self.report_write(Document::PlayerState, saved);
    }

    pub fn high_scores(&self) -> HighScores {
        self.repository.load_high_scores()
    }

    // --- Results log ---

    /// Prepend `entry` and keep only the newest `history_limit` entries.
    pub fn append_history(&mut self, entry: GameHistoryEntry) {
        let mut log = self.repository.load_history();
        log.insert(0, entry);
        log.truncate(self.config.history_limit);

        let saved = self.repository.save_history(&log);
        self.report_write(Document::ResultsLog, saved);
    }

    /// Results log, newest first.
    pub fn history(&self) -> Vec<GameHistoryEntry> {
        let mut log = self.repository.load_history();
        log.truncate(self.config.history_limit);
        log
    }

    // --- Vocabulary list ---

    pub fn import_vocabulary(&mut self, pairs: &[WordPair]) {
        let saved = self.repository.save_vocabulary(pairs);
        if self.report_write(Document::Vocabulary, saved) {
            info!("Stored vocabulary list with {} pairs", pairs.len());
        }
    }

    pub fn vocabulary(&self) -> Option<Vec<WordPair>> {
        self.repository.load_vocabulary()
    }

    pub fn clear_vocabulary(&mut self) {
        let cleared = self.repository.clear_vocabulary();
        self.report_write(Document::Vocabulary, cleared);
    }
}
