use services::{QuizPhase, QuizSnapshot};
use vocab_core::model::WordId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub id: WordId,
    pub label: String,
    pub mark: OptionMark,
    pub disabled: bool,
}

impl OptionVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.mark {
            OptionMark::Neutral => "word-option",
            OptionMark::Correct => "word-option correct",
            OptionMark::Incorrect => "word-option incorrect",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizVm {
    Loading,
    /// Fetch failed; the learner can retry.
    Stalled { message: String, expired: bool },
    Round {
        prompt: String,
        options: Vec<OptionVm>,
        revealed: bool,
    },
}

#[must_use]
pub fn map_quiz(snapshot: &QuizSnapshot) -> QuizVm {
    if let Some(failure) = &snapshot.failure {
        return QuizVm::Stalled {
            message: failure.to_string(),
            expired: *failure == services::QuizFailure::Unauthorized,
        };
    }
    let Some(item) = &snapshot.item else {
        return QuizVm::Loading;
    };

    let revealed = snapshot.phase == QuizPhase::Revealed;
    let correct = item.choices().correct_id();
    let chosen = snapshot.selection.map(|selection| selection.chosen_id());
    let options = item
        .choices()
        .options()
        .iter()
        .map(|option| {
            let mark = if !revealed {
                OptionMark::Neutral
            } else if option.id == correct {
                OptionMark::Correct
            } else if Some(option.id) == chosen {
                OptionMark::Incorrect
            } else {
                OptionMark::Neutral
            };
            OptionVm {
                id: option.id,
                label: option.label.clone(),
                mark,
                disabled: revealed,
            }
        })
        .collect();

    QuizVm::Round {
        prompt: item.word().native_text().to_string(),
        options,
        revealed,
    }
}
