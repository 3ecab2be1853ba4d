use game_types::{GameName, Settlement, VocabStat};

/// Document names used when reporting storage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    VocabStats,
    PlayerState,
    HighScores,
    ResultsLog,
    Vocabulary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    AnswerRecorded {
        word_key: String,
        is_correct: bool,
        stat: VocabStat,
    },
    HighScoreBeaten {
        game: GameName,
        previous: i64,
        score: i64,
    },
    RoundSettled {
        settlement: Settlement,
        siphon_triggered: bool,
    },
    /// A write was lost; the in-memory result was still returned to the caller.
    StorageWriteFailed {
        document: Document,
        reason: String,
    },
}

/// Event handler trait for reacting to progression changes (UI toasts, sounds, ...)
pub trait ProgressEventHandler {
    fn handle_event(&mut self, event: &ProgressEvent);
}

/// Simple event bus for distributing progression events
#[derive(Default)]
pub struct ProgressEventBus {
    handlers: Vec<Box<dyn ProgressEventHandler>>,
}

impl ProgressEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_handler(&mut self, handler: Box<dyn ProgressEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: ProgressEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(&event);
        }
    }
}
