use game_core::{Document, ProgressEvent, ProgressEventHandler};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Logs progression events as they happen.
///
/// Clones share their counters, so the caller can keep one handle after boxing another
/// into the engine.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier {
    records_beaten: Rc<Cell<usize>>,
    failed_documents: Rc<RefCell<Vec<Document>>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records_beaten(&self) -> usize {
        self.records_beaten.get()
    }

    pub fn failed_writes(&self) -> usize {
        self.failed_documents.borrow().len()
    }

    /// Documents whose last write was lost, in failure order.
    pub fn failed_documents(&self) -> Vec<Document> {
        self.failed_documents.borrow().clone()
    }
}

impl ProgressEventHandler for ConsoleNotifier {
    fn handle_event(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::AnswerRecorded {
                word_key,
                is_correct,
                stat,
            } => {
                debug!(
                    "{} answered {} ({} right, {} wrong)",
                    word_key,
                    if *is_correct { "correctly" } else { "wrongly" },
                    stat.correct_count,
                    stat.incorrect_count
                );
            }
            ProgressEvent::HighScoreBeaten {
                game,
                previous,
                score,
            } => {
                self.records_beaten.set(self.records_beaten.get() + 1);
                debug!(
                    "Record #{} this run: {} {} -> {}",
                    self.records_beaten.get(),
                    game,
                    previous,
                    score
                );
            }
            ProgressEvent::RoundSettled {
                siphon_triggered, ..
            } => {
                if *siphon_triggered {
                    info!("Soul Siphon doubled the reward");
                }
            }
            ProgressEvent::StorageWriteFailed { document, reason } => {
                self.failed_documents.borrow_mut().push(*document);
                warn!("Could not save {:?}: {}", document, reason);
            }
        }
    }
}
