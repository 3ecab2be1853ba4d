/// Tunables for [`crate::LearningEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Maximum number of entries kept in the results log.
    pub history_limit: usize,
    /// `chrono` format string for history timestamps, rendered in local time.
    pub timestamp_format: String,
    /// Staleness assumed for words that were never answered correctly.
    pub unseen_days_since_correct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: 100,
            timestamp_format: "%H:%M:%S %d/%m/%Y".to_string(),
            unseen_days_since_correct: 10.0,
        }
    }
}
