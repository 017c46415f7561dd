use serde::{Deserialize, Serialize};

use crate::evaluator::Evaluation;

/// Running tallies for the active quiz session.
///
/// Both counters only ever grow; a fresh session starts from `default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    correct: u32,
    incorrect: u32,
}

impl SessionStats {
    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }

    /// Returns the totals after one more evaluated attempt.
    #[must_use]
    pub fn with(self, evaluation: Evaluation) -> Self {
        if evaluation.is_correct {
            Self {
                correct: self.correct.saturating_add(1),
                ..self
            }
        } else {
            Self {
                incorrect: self.incorrect.saturating_add(1),
                ..self
            }
        }
    }

    /// Share of correct answers in percent, `None` before the first answer.
    #[must_use]
    pub fn accuracy_percent(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            None
        } else {
            Some(f64::from(self.correct) * 100.0 / f64::from(total))
        }
    }
}

/// Aggregate account statistics as reported by the progress service.
///
/// Displayed as-is; the client never recomputes these numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressOverview {
    pub total: u32,
    pub learned: u32,
    /// Percentage in `0.0..=100.0`.
    pub accuracy: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_none_when_empty() {
        assert_eq!(SessionStats::default().accuracy_percent(), None);
    }

    #[test]
    fn accuracy_tracks_ratio() {
        let stats = SessionStats::default()
            .with(Evaluation { is_correct: true })
            .with(Evaluation { is_correct: true })
            .with(Evaluation { is_correct: true })
            .with(Evaluation { is_correct: false });
        assert_eq!(stats.correct(), 3);
        assert_eq!(stats.incorrect(), 1);
        assert_eq!(stats.accuracy_percent(), Some(75.0));
    }
}
