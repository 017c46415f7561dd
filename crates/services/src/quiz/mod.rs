//! Quiz session engine: round lifecycle, timed auto-advance and running statistics.

mod controller;
mod reporter;
mod round;
mod stats;
mod timer;

use std::time::Duration;

use vocab_core::calendar::DEFAULT_WINDOW_DAYS;

pub use controller::{QuizSession, QuizSessionBuilder};
pub use reporter::{ErrorReporter, LogReporter, SessionExpiryReporter};
pub use round::{
    FetchOutcome, FetchTicket, QuizFailure, QuizMachine, QuizPhase, QuizSnapshot, Reveal, RoundId,
};
pub use stats::StatsAccumulator;

/// Pause between revealing an answer and loading the next word.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1500);

/// Tunables for the learn and progress pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    pub reveal_delay: Duration,
    pub calendar_window_days: u32,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            reveal_delay: DEFAULT_REVEAL_DELAY,
            calendar_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}
