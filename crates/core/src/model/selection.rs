use crate::evaluator::Evaluation;
use crate::model::ids::WordId;

/// The single pick recorded for a round. Frozen once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    chosen_id: WordId,
    is_correct: bool,
}

impl Selection {
    #[must_use]
    pub fn new(chosen_id: WordId, evaluation: Evaluation) -> Self {
        Self {
            chosen_id,
            is_correct: evaluation.is_correct,
        }
    }

    #[must_use]
    pub fn chosen_id(&self) -> WordId {
        self.chosen_id
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn evaluation(&self) -> Evaluation {
        Evaluation {
            is_correct: self.is_correct,
        }
    }
}
