use async_trait::async_trait;
use chrono::NaiveDate;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use vocab_core::Clock;
use vocab_core::model::{
    ActivitySample, ChoiceOption, ProgressOverview, SessionContext, Word, WordError, WordId,
};

/// Errors surfaced by storage adapters and remote collaborators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    /// The session credential was rejected; the caller must sign in again.
    #[error("unauthorized")]
    Unauthorized,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// The payload decoded but its word violates the domain rules.
    #[error(transparent)]
    InvalidWord(#[from] WordError),
}

impl StorageError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, StorageError::Unauthorized)
    }
}

/// Unvalidated "next word" payload as delivered by the word service.
///
/// The quiz controller checks the choice-set invariant before rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextWord {
    pub word: Word,
    pub options: Vec<ChoiceOption>,
    /// Correct id when the service states it explicitly.
    pub declared_correct: Option<WordId>,
}

/// Source of quiz items. Which word comes next is decided by the implementation.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Fetch the next word together with its answer options.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the item cannot be fetched.
    async fn next_word(&self) -> Result<NextWord, StorageError>;
}

/// Sink for per-round outcomes.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Record whether the learner answered `word_id` correctly.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the outcome cannot be recorded.
    async fn record_outcome(&self, word_id: WordId, is_correct: bool) -> Result<(), StorageError>;
}

/// Longitudinal progress queries.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Per-day event counts for the trailing `window_days` days, in any order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the series cannot be fetched.
    async fn activity(&self, window_days: u32) -> Result<Vec<ActivitySample>, StorageError>;

    /// Aggregate account statistics.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the statistics cannot be fetched.
    async fn overview(&self) -> Result<ProgressOverview, StorageError>;
}

/// Persistence for the signed-in session, the only state kept across restarts.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the stored session cannot be read.
    async fn load_session(&self) -> Result<Option<SessionContext>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn save_session(&self, session: &SessionContext) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the stored session cannot be removed.
    async fn clear_session(&self) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

/// Number of distractors served next to the correct word.
pub const DISTRACTOR_COUNT: usize = 7;
/// Recently served words are skipped while other candidates remain.
pub const RECENT_EXCLUSION: usize = 5;

#[derive(Default)]
struct MemoryState {
    words: Vec<Word>,
    recent: VecDeque<WordId>,
    activity: BTreeMap<NaiveDate, u32>,
    answers: HashMap<WordId, WordTally>,
    session: Option<SessionContext>,
}

#[derive(Clone, Copy, Default)]
struct WordTally {
    correct: u32,
    incorrect: u32,
}

/// Simple in-memory backend for tests, prototyping and offline drilling.
///
/// Serves random words from a fixed list, records outcomes into a per-day
/// activity series and keeps the signed-in session in memory.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
    clock: Clock,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_words(words: Vec<Word>) -> Self {
        let repo = Self::new();
        if let Ok(mut guard) = repo.state.lock() {
            guard.words = words;
        }
        repo
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

fn pick_next(state: &mut MemoryState) -> Result<NextWord, StorageError> {
    let mut rng = rand::rng();
    let fresh: Vec<&Word> = state
        .words
        .iter()
        .filter(|word| !state.recent.contains(&word.id()))
        .collect();
    let word = if fresh.is_empty() {
        state.words.choose(&mut rng)
    } else {
        fresh.choose(&mut rng).copied()
    }
    .cloned()
    .ok_or(StorageError::NotFound)?;

    let others: Vec<&Word> = state
        .words
        .iter()
        .filter(|candidate| candidate.id() != word.id())
        .collect();
    let mut options: Vec<ChoiceOption> = others
        .choose_multiple(&mut rng, DISTRACTOR_COUNT)
        .map(|other| ChoiceOption::new(other.id(), other.target_text()))
        .collect();
    options.push(ChoiceOption::new(word.id(), word.target_text()));
    options.shuffle(&mut rng);

    state.recent.push_back(word.id());
    while state.recent.len() > RECENT_EXCLUSION {
        state.recent.pop_front();
    }

    Ok(NextWord {
        declared_correct: Some(word.id()),
        word,
        options,
    })
}

fn overview_of(state: &MemoryState) -> ProgressOverview {
    let total = u32::try_from(state.words.len()).unwrap_or(u32::MAX);
    let learned = state
        .answers
        .values()
        .filter(|tally| tally.correct > 0)
        .count();
    let (correct, answered) = state.answers.values().fold((0_u64, 0_u64), |(c, n), tally| {
        (
            c + u64::from(tally.correct),
            n + u64::from(tally.correct) + u64::from(tally.incorrect),
        )
    });
    #[allow(clippy::cast_precision_loss)]
    let accuracy = if answered == 0 {
        0.0
    } else {
        (correct as f64 * 10_000.0 / answered as f64).round() / 100.0
    };
    ProgressOverview {
        total,
        learned: u32::try_from(learned).unwrap_or(u32::MAX),
        accuracy,
    }
}

#[async_trait]
impl WordRepository for InMemoryRepository {
    async fn next_word(&self) -> Result<NextWord, StorageError> {
        let mut guard = self.lock()?;
        pick_next(&mut guard)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn record_outcome(&self, word_id: WordId, is_correct: bool) -> Result<(), StorageError> {
        let today = self.clock.today();
        let mut guard = self.lock()?;
        let tally = guard.answers.entry(word_id).or_default();
        if is_correct {
            tally.correct = tally.correct.saturating_add(1);
        } else {
            tally.incorrect = tally.incorrect.saturating_add(1);
        }
        let day = guard.activity.entry(today).or_insert(0);
        *day = day.saturating_add(1);
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for InMemoryRepository {
    async fn activity(&self, window_days: u32) -> Result<Vec<ActivitySample>, StorageError> {
        let today = self.clock.today();
        let guard = self.lock()?;
        let from = today
            .checked_sub_days(chrono::Days::new(u64::from(window_days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);
        Ok(guard
            .activity
            .range(from..=today)
            .map(|(date, count)| ActivitySample::new(*date, *count))
            .collect())
    }

    async fn overview(&self) -> Result<ProgressOverview, StorageError> {
        let guard = self.lock()?;
        Ok(overview_of(&guard))
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn load_session(&self) -> Result<Option<SessionContext>, StorageError> {
        Ok(self.lock()?.session.clone())
    }

    async fn save_session(&self, session: &SessionContext) -> Result<(), StorageError> {
        self.lock()?.session = Some(session.clone());
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        self.lock()?.session = None;
        Ok(())
    }
}

/// Aggregates the remote collaborators behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub words: Arc<dyn WordRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub activity: Arc<dyn ActivityRepository>,
}

impl Storage {
    /// Use one backend for every collaborator.
    #[must_use]
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: WordRepository + ProgressRepository + ActivityRepository + 'static,
    {
        let words: Arc<dyn WordRepository> = backend.clone();
        let progress: Arc<dyn ProgressRepository> = backend.clone();
        let activity: Arc<dyn ActivityRepository> = backend;
        Self {
            words,
            progress,
            activity,
        }
    }

    #[must_use]
    pub fn in_memory(repo: InMemoryRepository) -> Self {
        Self::from_backend(Arc::new(repo))
    }
}
