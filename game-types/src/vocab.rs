use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// A vocabulary unit. `source_text` doubles as the statistics key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WordPair {
    pub source_text: String,
    pub target_text: String,
}

impl WordPair {
    /// Build a pair from raw import cells, trimming both sides.
    /// Returns `None` when either side is empty after trimming.
    pub fn new(source_text: &str, target_text: &str) -> Option<Self> {
        let source_text = source_text.trim();
        let target_text = target_text.trim();
        if source_text.is_empty() || target_text.is_empty() {
            return None;
        }

        Some(Self {
            source_text: source_text.to_string(),
            target_text: target_text.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.source_text
    }
}

/// Per-word answer history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct VocabStat {
    pub correct_count: u32,
    pub incorrect_count: u32,
    /// 0 means the word was never answered correctly.
    #[ts(type = "number")]
    pub last_correct_epoch_millis: i64,
}

impl VocabStat {
    pub fn has_been_correct(&self) -> bool {
        self.last_correct_epoch_millis > 0
    }
}

/// The whole stats document, keyed by `WordPair::source_text`.
pub type VocabStats = BTreeMap<String, VocabStat>;
