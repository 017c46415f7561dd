use tokio::sync::watch;

use vocab_core::evaluator::{self, Evaluation};
use vocab_core::model::SessionStats;

/// Single-writer running totals for one quiz session, observable by any number of readers.
#[derive(Debug)]
pub struct StatsAccumulator {
    tx: watch::Sender<SessionStats>,
}

impl Default for StatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsAccumulator {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionStats::default());
        Self { tx }
    }

    /// Fold one evaluation in and notify observers. Returns the new totals.
    pub fn accumulate(&self, evaluation: Evaluation) -> SessionStats {
        self.tx
            .send_modify(|stats| *stats = evaluator::fold(*stats, evaluation));
        self.current()
    }

    #[must_use]
    pub fn current(&self) -> SessionStats {
        *self.tx.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStats> {
        self.tx.subscribe()
    }
}
