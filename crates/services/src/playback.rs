//! Pronunciation playback.
//!
//! Audio is one shared resource: every `play` first stops whatever is
//! playing, and failures only ever degrade the state to `NotLoaded`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error("could not load {url}: {reason}")]
    Load { url: Url, reason: String },
    #[error("audio device error: {0}")]
    Device(String),
}

/// Platform audio primitive.
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Load `url` from the start and begin playing it.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError` if the resource cannot be loaded or played.
    async fn play(&self, url: &Url) -> Result<(), PlaybackError>;

    /// Pause and rewind whatever is playing. Never fails.
    async fn stop(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing(Url),
    /// The last resource failed to load; the quiz carries on without sound.
    NotLoaded(Url),
}

#[derive(Clone)]
pub struct PlaybackCoordinator {
    output: Arc<dyn AudioOutput>,
    gate: Arc<Mutex<()>>,
    state: Arc<watch::Sender<PlaybackState>>,
}

impl PlaybackCoordinator {
    #[must_use]
    pub fn new(output: Arc<dyn AudioOutput>) -> Self {
        let (state, _rx) = watch::channel(PlaybackState::Idle);
        Self {
            output,
            gate: Arc::new(Mutex::new(())),
            state: Arc::new(state),
        }
    }

    /// Stop the current recording, then play `url`.
    pub async fn play(&self, url: Url) {
        let _gate = self.gate.lock().await;
        self.output.stop().await;
        self.state.send_replace(PlaybackState::Playing(url.clone()));
        if let Err(err) = self.output.play(&url).await {
            log::warn!("playback degraded: {err}");
            self.state.send_replace(PlaybackState::NotLoaded(url));
        }
    }

    pub async fn stop(&self) {
        let _gate = self.gate.lock().await;
        self.output.stop().await;
        self.state.send_replace(PlaybackState::Idle);
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct RecordingOutput {
        calls: StdMutex<Vec<String>>,
        broken: bool,
    }

    #[async_trait]
    impl AudioOutput for RecordingOutput {
        async fn play(&self, url: &Url) -> Result<(), PlaybackError> {
            self.calls.lock().unwrap().push(format!("play {}", url.path()));
            if self.broken {
                return Err(PlaybackError::Load {
                    url: url.clone(),
                    reason: "404".into(),
                });
            }
            tokio::task::yield_now().await;
            Ok(())
        }

        async fn stop(&self) {
            self.calls.lock().unwrap().push("stop".into());
        }
    }

    fn url(path: &str) -> Url {
        Url::parse("http://localhost:8000").unwrap().join(path).unwrap()
    }

    #[tokio::test]
    async fn stops_before_every_play() {
        let output = Arc::new(RecordingOutput::default());
        let coordinator = PlaybackCoordinator::new(output.clone());

        let a = coordinator.clone();
        let b = coordinator.clone();
        tokio::join!(a.play(url("/a.mp3")), b.play(url("/b.mp3")));

        let calls = output.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], "stop");
        assert_eq!(calls[2], "stop");
        assert!(calls[1].starts_with("play "));
        assert!(calls[3].starts_with("play "));
        assert!(matches!(coordinator.state(), PlaybackState::Playing(_)));
    }

    #[tokio::test]
    async fn failure_degrades_to_not_loaded() {
        let output = Arc::new(RecordingOutput {
            broken: true,
            ..RecordingOutput::default()
        });
        let coordinator = PlaybackCoordinator::new(output);
        coordinator.play(url("/missing.mp3")).await;
        assert_eq!(
            coordinator.state(),
            PlaybackState::NotLoaded(url("/missing.mp3"))
        );
    }

    #[tokio::test]
    async fn stop_returns_to_idle() {
        let coordinator = PlaybackCoordinator::new(Arc::new(RecordingOutput::default()));
        coordinator.play(url("/a.mp3")).await;
        coordinator.stop().await;
        assert_eq!(coordinator.state(), PlaybackState::Idle);
    }
}
