use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::WordId;
use crate::model::word::Word;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Reasons a payload from the word service cannot be turned into a quiz round.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChoiceSetError {
    #[error("choice set is empty")]
    Empty,

    #[error("correct option {correct} is missing from the choice set")]
    MissingCorrect { correct: WordId },

    #[error("correct option {correct} appears more than once")]
    DuplicateCorrect { correct: WordId },

    #[error("option {id} appears more than once")]
    DuplicateOption { id: WordId },

    #[error("payload names {declared} as correct but the word is {word}")]
    CorrectIdMismatch { declared: WordId, word: WordId },
}

//
// ─── CHOICE SET ────────────────────────────────────────────────────────────────
//

/// One candidate answer as shown on a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub id: WordId,
    pub label: String,
}

impl ChoiceOption {
    #[must_use]
    pub fn new(id: WordId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Ordered candidate answers for a round.
///
/// The correct identifier is present exactly once and no two options share an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    correct_id: WordId,
    options: Vec<ChoiceOption>,
}

impl ChoiceSet {
    /// Validate the options against the correct identifier.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceSetError` when the set is empty, the correct id is missing
    /// or duplicated, or any other id is duplicated.
    pub fn new(correct_id: WordId, options: Vec<ChoiceOption>) -> Result<Self, ChoiceSetError> {
        if options.is_empty() {
            return Err(ChoiceSetError::Empty);
        }

        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.id) {
                return Err(if option.id == correct_id {
                    ChoiceSetError::DuplicateCorrect {
                        correct: correct_id,
                    }
                } else {
                    ChoiceSetError::DuplicateOption { id: option.id }
                });
            }
        }

        if !seen.contains(&correct_id) {
            return Err(ChoiceSetError::MissingCorrect {
                correct: correct_id,
            });
        }

        Ok(Self {
            correct_id,
            options,
        })
    }

    #[must_use]
    pub fn correct_id(&self) -> WordId {
        self.correct_id
    }

    #[must_use]
    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    #[must_use]
    pub fn contains(&self, id: WordId) -> bool {
        self.options.iter().any(|option| option.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

//
// ─── QUIZ ITEM ─────────────────────────────────────────────────────────────────
//

/// A validated word together with its choice set: everything a round renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    word: Word,
    choices: ChoiceSet,
}

impl QuizItem {
    /// Build an item whose correct answer is the word itself.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceSetError` if the options violate the choice-set invariant.
    pub fn new(word: Word, options: Vec<ChoiceOption>) -> Result<Self, ChoiceSetError> {
        let choices = ChoiceSet::new(word.id(), options)?;
        Ok(Self { word, choices })
    }

    #[must_use]
    pub fn word(&self) -> &Word {
        &self.word
    }

    #[must_use]
    pub fn choices(&self) -> &ChoiceSet {
        &self.choices
    }
}
