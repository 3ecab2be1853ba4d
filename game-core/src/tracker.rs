use game_types::{VocabStat, VocabStats};

/// Per-word answer bookkeeping.
pub struct VocabTracker;

impl VocabTracker {
    /// Count one answer for `word_key`, creating its entry on first use.
    pub fn apply(
        stats: &mut VocabStats,
        word_key: &str,
        is_correct: bool,
        now_millis: i64,
    ) -> VocabStat {
        let stat = stats.entry(word_key.to_string()).or_default();
        if is_correct {
            stat.correct_count = stat.correct_count.saturating_add(1);
            stat.last_correct_epoch_millis = now_millis;
        } else {
            stat.incorrect_count = stat.incorrect_count.saturating_add(1);
        }
        *stat
    }
}
