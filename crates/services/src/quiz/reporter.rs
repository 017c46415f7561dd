use tokio::sync::watch;

use crate::error::QuizError;

/// Sink for quiz failures that the learner or the auth layer must hear about.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &QuizError);
}

/// Writes failures to the log and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, error: &QuizError) {
        log::error!("quiz: {error}");
    }
}

/// Logs failures and raises a flag when the session credential is rejected.
#[derive(Debug)]
pub struct SessionExpiryReporter {
    expired: watch::Sender<bool>,
}

impl SessionExpiryReporter {
    #[must_use]
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (expired, rx) = watch::channel(false);
        (Self { expired }, rx)
    }
}

impl ErrorReporter for SessionExpiryReporter {
    fn report(&self, error: &QuizError) {
        LogReporter.report(error);
        if matches!(error, QuizError::Unauthorized) {
            self.expired.send_replace(true);
        }
    }
}
