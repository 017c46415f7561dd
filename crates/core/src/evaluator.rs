//! Answer evaluation.
//!
//! Identifier equality is the only correctness criterion; there is no partial
//! credit and no failure mode.

use crate::model::{Selection, SessionStats, WordId};

/// Classification of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub is_correct: bool,
}

/// Classify `chosen` against the round's `correct` identifier.
#[must_use]
pub fn evaluate(chosen: WordId, correct: WordId) -> Evaluation {
    Evaluation {
        is_correct: chosen == correct,
    }
}

/// Evaluate a pick and freeze it as the round's selection.
#[must_use]
pub fn select(chosen: WordId, correct: WordId) -> Selection {
    Selection::new(chosen, evaluate(chosen, correct))
}

/// Pure statistics fold: one more correct or one more incorrect attempt.
#[must_use]
pub fn fold(stats: SessionStats, evaluation: Evaluation) -> SessionStats {
    stats.with(evaluation)
}
