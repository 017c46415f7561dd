use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::runtime::Handle;
use tokio::sync::watch;
use url::Url;

use storage::repository::{ProgressRepository, WordRepository};
use vocab_core::model::{QuizItem, Selection, SessionStats, WordId};

use super::QuizSettings;
use super::reporter::{ErrorReporter, LogReporter};
use super::round::{FetchOutcome, FetchTicket, QuizMachine, QuizSnapshot, Reveal, RoundId};
use super::stats::StatsAccumulator;
use super::timer::AdvanceTimer;
use crate::error::QuizError;
use crate::playback::PlaybackCoordinator;

struct Core {
    machine: QuizMachine,
    timer: Option<AdvanceTimer>,
}

struct Inner {
    words: Arc<dyn WordRepository>,
    progress: Arc<dyn ProgressRepository>,
    reporter: Arc<dyn ErrorReporter>,
    playback: Option<(PlaybackCoordinator, Url)>,
    settings: QuizSettings,
    core: Mutex<Core>,
    snapshots: watch::Sender<QuizSnapshot>,
    stats: StatsAccumulator,
}

pub struct QuizSessionBuilder {
    words: Arc<dyn WordRepository>,
    progress: Arc<dyn ProgressRepository>,
    reporter: Arc<dyn ErrorReporter>,
    playback: Option<(PlaybackCoordinator, Url)>,
    settings: QuizSettings,
}

impl QuizSessionBuilder {
    #[must_use]
    pub fn new(words: Arc<dyn WordRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self {
            words,
            progress,
            reporter: Arc::new(LogReporter),
            playback: None,
            settings: QuizSettings::default(),
        }
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Play each revealed word's recording, resolved against `media_origin`.
    #[must_use]
    pub fn with_playback(mut self, playback: PlaybackCoordinator, media_origin: Url) -> Self {
        self.playback = Some((playback, media_origin));
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn build(self) -> QuizSession {
        let (snapshots, _rx) = watch::channel(QuizSnapshot::idle());
        QuizSession {
            inner: Arc::new(Inner {
                words: self.words,
                progress: self.progress,
                reporter: self.reporter,
                playback: self.playback,
                settings: self.settings,
                core: Mutex::new(Core {
                    machine: QuizMachine::new(),
                    timer: None,
                }),
                snapshots,
                stats: StatsAccumulator::new(),
            }),
        }
    }
}

/// Drives one learning session: fetch, answer, reveal, auto-advance.
///
/// Cheap to clone; clones share the same session. State changes are
/// published through `subscribe`, statistics through `stats`.
#[derive(Clone)]
pub struct QuizSession {
    inner: Arc<Inner>,
}

impl QuizSession {
    #[must_use]
    pub fn builder(
        words: Arc<dyn WordRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> QuizSessionBuilder {
        QuizSessionBuilder::new(words, progress)
    }

    /// Load the first word.
    pub async fn start(&self) {
        self.load_next().await;
    }

    /// Issue a fresh request after a stalled fetch.
    pub async fn retry(&self) {
        self.load_next().await;
    }

    /// Abandon the current round or request and fetch a new word.
    pub async fn load_next(&self) {
        let ticket = {
            let mut core = self.lock_core();
            drop(core.timer.take());
            let ticket = core.machine.begin_fetch();
            self.publish(&core);
            ticket
        };
        if let Some(ticket) = ticket {
            self.fetch(ticket).await;
        }
    }

    /// Answer the current round.
    ///
    /// The first selection of a round wins; later calls and calls while
    /// loading return `None` and change nothing. Statistics are updated
    /// before this returns; the progress report and audio run in the
    /// background.
    pub fn select(&self, chosen: WordId) -> Option<Selection> {
        let reveal = {
            let mut core = self.lock_core();
            let reveal = core.machine.select(chosen)?;
            core.timer = self.schedule_advance(reveal.round);
            self.publish(&core);
            reveal
        };
        let Reveal {
            item, selection, ..
        } = reveal;

        self.inner.stats.accumulate(selection.evaluation());
        log::debug!(
            "word {} answered {}",
            item.word().id(),
            if selection.is_correct() { "correctly" } else { "incorrectly" }
        );
        self.report_outcome(item.word().id(), selection.is_correct());
        self.play_audio(&item);
        Some(selection)
    }

    /// Cancel the pending advance and ignore any response still in flight.
    pub fn dispose(&self) {
        {
            let mut core = self.lock_core();
            drop(core.timer.take());
            core.machine.dispose();
            self.publish(&core);
        }
        if let (Some((playback, _)), Ok(runtime)) = (&self.inner.playback, Handle::try_current()) {
            let playback = playback.clone();
            runtime.spawn(async move { playback.stop().await });
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.inner.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.inner.snapshots.subscribe()
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.inner.stats.current()
    }

    #[must_use]
    pub fn subscribe_stats(&self) -> watch::Receiver<SessionStats> {
        self.inner.stats.subscribe()
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.inner.settings
    }

    // ─── internals ─────────────────────────────────────────────────────────────

    fn lock_core(&self) -> MutexGuard<'_, Core> {
        self.inner.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, core: &Core) {
        self.inner.snapshots.send_replace(core.machine.snapshot());
    }

    async fn fetch(&self, ticket: FetchTicket) {
        let result = self.inner.words.next_word().await;
        let outcome = {
            let mut core = self.lock_core();
            let outcome = core.machine.complete_fetch(ticket, result);
            self.publish(&core);
            outcome
        };
        match outcome {
            Ok(FetchOutcome::Ready(round)) => log::debug!("round {round:?} ready"),
            Ok(FetchOutcome::Stale) => log::debug!("discarding stale response for {ticket:?}"),
            Err(err) => self.inner.reporter.report(&err),
        }
    }

    fn schedule_advance(&self, round: RoundId) -> Option<AdvanceTimer> {
        let session = Arc::downgrade(&self.inner);
        let timer = AdvanceTimer::schedule(self.inner.settings.reveal_delay, async move {
            advance_from(session, round).await;
        });
        if timer.is_none() {
            log::warn!("no async runtime; round {round:?} will not auto-advance");
        }
        timer
    }

    fn report_outcome(&self, word_id: WordId, is_correct: bool) {
        let Ok(runtime) = Handle::try_current() else {
            log::warn!("no async runtime; outcome for word {word_id} not reported");
            return;
        };
        let progress = Arc::clone(&self.inner.progress);
        let reporter = Arc::clone(&self.inner.reporter);
        runtime.spawn(async move {
            if let Err(err) = progress.record_outcome(word_id, is_correct).await {
                if err.is_unauthorized() {
                    reporter.report(&QuizError::Unauthorized);
                } else {
                    log::warn!("progress for word {word_id} not recorded: {err}");
                }
            }
        });
    }

    fn play_audio(&self, item: &QuizItem) {
        let Some((playback, origin)) = &self.inner.playback else {
            return;
        };
        let Some(url) = item.word().audio_url(origin) else {
            return;
        };
        if let Ok(runtime) = Handle::try_current() {
            let playback = playback.clone();
            runtime.spawn(async move { playback.play(url).await });
        }
    }
}

async fn advance_from(session: Weak<Inner>, round: RoundId) {
    let Some(inner) = session.upgrade() else {
        return;
    };
    let session = QuizSession { inner };
    let ticket = {
        let mut core = session.lock_core();
        let ticket = core.machine.advance(round);
        if ticket.is_some() {
            // This task is the timer; release it without aborting ourselves.
            if let Some(timer) = core.timer.take() {
                timer.disarm();
            }
            session.publish(&core);
        }
        ticket
    };
    if let Some(ticket) = ticket {
        session.fetch(ticket).await;
    }
}
