//! Round lifecycle as a pure state machine.
//!
//! The machine owns no tasks and performs no I/O. The controller drives it
//! with fetch tickets and round ids so that late fetch responses and late
//! timer firings are recognised and dropped.

use std::fmt;

use storage::StorageError;
use storage::repository::NextWord;
use vocab_core::evaluator;
use vocab_core::model::{ChoiceSetError, QuizItem, Selection, WordId};

use crate::error::QuizError;

/// Identifies one outstanding next-word request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

/// Identifies one rendered round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Not started yet.
    Idle,
    Loading,
    AwaitingInput,
    Revealed,
    Disposed,
}

/// Why the quiz is stalled in `Loading`, kept for display until the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizFailure {
    Fetch(String),
    Unauthorized,
    Malformed(String),
}

impl From<&QuizError> for QuizFailure {
    fn from(err: &QuizError) -> Self {
        match err {
            QuizError::Unauthorized => QuizFailure::Unauthorized,
            QuizError::Malformed(inner) => QuizFailure::Malformed(inner.to_string()),
            QuizError::InvalidWord(inner) => QuizFailure::Malformed(inner.to_string()),
            other => QuizFailure::Fetch(other.to_string()),
        }
    }
}

impl fmt::Display for QuizFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizFailure::Fetch(msg) => write!(f, "could not load the next word: {msg}"),
            QuizFailure::Unauthorized => f.write_str("your session has expired"),
            QuizFailure::Malformed(msg) => write!(f, "received an unusable word: {msg}"),
        }
    }
}

/// Observable view of the quiz, published after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub item: Option<QuizItem>,
    pub selection: Option<Selection>,
    pub failure: Option<QuizFailure>,
}

impl QuizSnapshot {
    #[must_use]
    pub fn idle() -> Self {
        Self {
            phase: QuizPhase::Idle,
            item: None,
            selection: None,
            failure: None,
        }
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.phase == QuizPhase::Revealed
    }
}

/// Result of completing a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Ready(RoundId),
    /// A newer request was issued, or the session was disposed, before this one returned.
    Stale,
}

/// The first selection of a round, with what the controller needs to act on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub round: RoundId,
    pub item: QuizItem,
    pub selection: Selection,
}

#[derive(Debug)]
struct Round {
    id: RoundId,
    item: QuizItem,
}

#[derive(Debug)]
enum State {
    Idle,
    Loading {
        ticket: FetchTicket,
        failure: Option<QuizFailure>,
    },
    AwaitingInput(Round),
    Revealed(Round, Selection),
    Disposed,
}

#[derive(Debug)]
pub struct QuizMachine {
    state: State,
    next_ticket: u64,
    next_round: u64,
}

impl Default for QuizMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizMachine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            next_ticket: 0,
            next_round: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match self.state {
            State::Idle => QuizPhase::Idle,
            State::Loading { .. } => QuizPhase::Loading,
            State::AwaitingInput(_) => QuizPhase::AwaitingInput,
            State::Revealed(..) => QuizPhase::Revealed,
            State::Disposed => QuizPhase::Disposed,
        }
    }

    /// Enter `Loading` with a fresh ticket, superseding any earlier request or round.
    ///
    /// Returns `None` once disposed.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if matches!(self.state, State::Disposed) {
            return None;
        }
        self.next_ticket += 1;
        let ticket = FetchTicket(self.next_ticket);
        self.state = State::Loading {
            ticket,
            failure: None,
        };
        Some(ticket)
    }

    /// Apply the response for `ticket`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the fetch failed or the payload violates the
    /// choice-set invariant. The machine then stays in `Loading` with the
    /// failure recorded; nothing is retried automatically.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<NextWord, StorageError>,
    ) -> Result<FetchOutcome, QuizError> {
        match &self.state {
            State::Loading { ticket: current, .. } if *current == ticket => {}
            _ => return Ok(FetchOutcome::Stale),
        }

        match result.map_err(QuizError::from).and_then(validate) {
            Ok(item) => {
                self.next_round += 1;
                let id = RoundId(self.next_round);
                self.state = State::AwaitingInput(Round { id, item });
                Ok(FetchOutcome::Ready(id))
            }
            Err(err) => {
                self.state = State::Loading {
                    ticket,
                    failure: Some(QuizFailure::from(&err)),
                };
                Err(err)
            }
        }
    }

    /// Lock in the first selection of the current round.
    ///
    /// Returns `None` (and changes nothing) unless a round is awaiting input.
    pub fn select(&mut self, chosen: WordId) -> Option<Reveal> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::AwaitingInput(round) => {
                let selection = evaluator::select(chosen, round.item.choices().correct_id());
                let reveal = Reveal {
                    round: round.id,
                    item: round.item.clone(),
                    selection,
                };
                self.state = State::Revealed(round, selection);
                Some(reveal)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Leave the revealed round `round` for the next fetch.
    ///
    /// Ignored if `round` is no longer the revealed round.
    pub fn advance(&mut self, round: RoundId) -> Option<FetchTicket> {
        match &self.state {
            State::Revealed(current, _) if current.id == round => self.begin_fetch(),
            _ => None,
        }
    }

    pub fn dispose(&mut self) {
        self.state = State::Disposed;
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        let phase = self.phase();
        match &self.state {
            State::Idle | State::Disposed => QuizSnapshot {
                phase,
                ..QuizSnapshot::idle()
            },
            State::Loading { failure, .. } => QuizSnapshot {
                phase,
                item: None,
                selection: None,
                failure: failure.clone(),
            },
            State::AwaitingInput(round) => QuizSnapshot {
                phase,
                item: Some(round.item.clone()),
                selection: None,
                failure: None,
            },
            State::Revealed(round, selection) => QuizSnapshot {
                phase,
                item: Some(round.item.clone()),
                selection: Some(*selection),
                failure: None,
            },
        }
    }
}

fn validate(next: NextWord) -> Result<QuizItem, QuizError> {
    if let Some(declared) = next.declared_correct {
        if declared != next.word.id() {
            return Err(ChoiceSetError::CorrectIdMismatch {
                declared,
                word: next.word.id(),
            }
            .into());
        }
    }
    Ok(QuizItem::new(next.word, next.options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::model::{ChoiceOption, Word, WordError};

    fn payload(id: u64, options: &[u64]) -> NextWord {
        NextWord {
            word: Word::new(WordId::new(id), format!("w{id}"), format!("n{id}"), "").unwrap(),
            options: options
                .iter()
                .map(|o| ChoiceOption::new(WordId::new(*o), format!("w{o}")))
                .collect(),
            declared_correct: Some(WordId::new(id)),
        }
    }

    fn ready(machine: &mut QuizMachine, id: u64) -> RoundId {
        let ticket = machine.begin_fetch().unwrap();
        match machine.complete_fetch(ticket, Ok(payload(id, &[id, id + 100]))) {
            Ok(FetchOutcome::Ready(round)) => round,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fetch_then_select_reveals() {
        let mut machine = QuizMachine::new();
        assert_eq!(machine.phase(), QuizPhase::Idle);
        let round = ready(&mut machine, 1);
        assert_eq!(machine.phase(), QuizPhase::AwaitingInput);
        assert_eq!(machine.snapshot().selection, None);

        let reveal = machine.select(WordId::new(1)).unwrap();
        assert_eq!(reveal.round, round);
        assert!(reveal.selection.is_correct());
        assert_eq!(machine.phase(), QuizPhase::Revealed);
    }

    #[test]
    fn first_selection_wins() {
        let mut machine = QuizMachine::new();
        ready(&mut machine, 1);
        let first = machine.select(WordId::new(101)).unwrap();
        assert!(!first.selection.is_correct());
        assert!(machine.select(WordId::new(1)).is_none());
        assert_eq!(machine.snapshot().selection, Some(first.selection));
    }

    #[test]
    fn select_while_loading_is_ignored() {
        let mut machine = QuizMachine::new();
        machine.begin_fetch();
        assert!(machine.select(WordId::new(1)).is_none());
        assert_eq!(machine.phase(), QuizPhase::Loading);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut machine = QuizMachine::new();
        let first = machine.begin_fetch().unwrap();
        let second = machine.begin_fetch().unwrap();
        assert_eq!(
            machine.complete_fetch(first, Ok(payload(1, &[1]))).unwrap(),
            FetchOutcome::Stale
        );
        assert_eq!(machine.phase(), QuizPhase::Loading);
        assert!(matches!(
            machine.complete_fetch(second, Ok(payload(2, &[2]))),
            Ok(FetchOutcome::Ready(_))
        ));
        assert_eq!(
            machine.snapshot().item.unwrap().word().id(),
            WordId::new(2)
        );
    }

    #[test]
    fn failed_fetch_stays_loading() {
        let mut machine = QuizMachine::new();
        let ticket = machine.begin_fetch().unwrap();
        let err = machine
            .complete_fetch(ticket, Err(StorageError::Connection("down".into())))
            .unwrap_err();
        assert!(matches!(err, QuizError::Fetch(_)));
        let snapshot = machine.snapshot();
        assert_eq!(snapshot.phase, QuizPhase::Loading);
        assert!(matches!(snapshot.failure, Some(QuizFailure::Fetch(_))));
    }

    #[test]
    fn unauthorized_fetch_is_its_own_kind() {
        let mut machine = QuizMachine::new();
        let ticket = machine.begin_fetch().unwrap();
        let err = machine
            .complete_fetch(ticket, Err(StorageError::Unauthorized))
            .unwrap_err();
        assert!(matches!(err, QuizError::Unauthorized));
        assert_eq!(machine.snapshot().failure, Some(QuizFailure::Unauthorized));
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        let mut machine = QuizMachine::new();

        let ticket = machine.begin_fetch().unwrap();
        let missing = machine.complete_fetch(ticket, Ok(payload(1, &[2, 3])));
        assert!(matches!(
            missing,
            Err(QuizError::Malformed(ChoiceSetError::MissingCorrect { .. }))
        ));

        let ticket = machine.begin_fetch().unwrap();
        let duplicated = machine.complete_fetch(ticket, Ok(payload(1, &[1, 2, 1])));
        assert!(matches!(
            duplicated,
            Err(QuizError::Malformed(ChoiceSetError::DuplicateCorrect { .. }))
        ));

        let ticket = machine.begin_fetch().unwrap();
        let mut mismatched = payload(1, &[1, 2]);
        mismatched.declared_correct = Some(WordId::new(2));
        assert!(matches!(
            machine.complete_fetch(ticket, Ok(mismatched)),
            Err(QuizError::Malformed(ChoiceSetError::CorrectIdMismatch { .. }))
        ));
        assert_eq!(machine.phase(), QuizPhase::Loading);
    }

    #[test]
    fn blank_word_is_reported_as_malformed() {
        let mut machine = QuizMachine::new();
        let ticket = machine.begin_fetch().unwrap();
        let invalid = StorageError::InvalidWord(WordError::EmptyTargetText { id: WordId::new(5) });
        let err = machine.complete_fetch(ticket, Err(invalid)).unwrap_err();
        assert!(matches!(err, QuizError::InvalidWord(_)));

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.phase, QuizPhase::Loading);
        assert!(matches!(snapshot.failure, Some(QuizFailure::Malformed(_))));
    }

    #[test]
    fn advance_only_applies_to_current_revealed_round() {
        let mut machine = QuizMachine::new();
        let round = ready(&mut machine, 1);
        assert!(machine.advance(round).is_none());

        machine.select(WordId::new(1));
        assert!(machine.advance(round).is_some());
        assert_eq!(machine.phase(), QuizPhase::Loading);
        assert!(machine.advance(round).is_none());
    }

    #[test]
    fn disposed_machine_ignores_everything() {
        let mut machine = QuizMachine::new();
        let ticket = machine.begin_fetch().unwrap();
        machine.dispose();
        assert_eq!(
            machine.complete_fetch(ticket, Ok(payload(1, &[1]))).unwrap(),
            FetchOutcome::Stale
        );
        assert!(machine.begin_fetch().is_none());
        assert_eq!(machine.phase(), QuizPhase::Disposed);
    }
}
