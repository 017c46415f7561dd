//! Pronunciation playback through the webview's `Audio` element.

use std::sync::Arc;

use async_trait::async_trait;
use dioxus::document::eval;
use dioxus::prelude::*;
use services::{AudioOutput, PlaybackError};
use tokio::sync::{mpsc, oneshot};
use url::Url;

enum AudioCommand {
    Play {
        url: Url,
        done: oneshot::Sender<Result<(), PlaybackError>>,
    },
    Stop {
        done: oneshot::Sender<()>,
    },
}

/// `AudioOutput` that forwards to a script runner living in the component tree.
///
/// Scripts can only be evaluated from inside the Dioxus runtime, so commands
/// travel over a channel to a task spawned by `use_webview_audio`.
pub struct WebviewAudio {
    commands: mpsc::UnboundedSender<AudioCommand>,
}

#[async_trait]
impl AudioOutput for WebviewAudio {
    async fn play(&self, url: &Url) -> Result<(), PlaybackError> {
        let (done, rx) = oneshot::channel();
        let unavailable = || PlaybackError::Device("audio runner stopped".into());
        self.commands
            .send(AudioCommand::Play {
                url: url.clone(),
                done,
            })
            .map_err(|_| unavailable())?;
        rx.await.map_err(|_| unavailable())?
    }

    async fn stop(&self) {
        let (done, rx) = oneshot::channel();
        if self.commands.send(AudioCommand::Stop { done }).is_ok() {
            let _ = rx.await;
        }
    }
}

fn play_script(url: &Url) -> String {
    format!(
        r#"const audio = window.__zubroslovAudio || (window.__zubroslovAudio = new Audio());
        audio.pause();
        audio.currentTime = 0;
        audio.src = {src:?};
        try {{
            audio.load();
            await audio.play();
            return true;
        }} catch (_) {{
            return false;
        }}"#,
        src = url.as_str()
    )
}

const STOP_SCRIPT: &str = r"const audio = window.__zubroslovAudio;
if (audio) {
    audio.pause();
    audio.currentTime = 0;
}
return true;";

/// Start the script runner for this component and return its output handle.
pub fn use_webview_audio() -> Arc<WebviewAudio> {
    use_hook(|| {
        let (commands, mut rx) = mpsc::unbounded_channel();
        spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    AudioCommand::Play { url, done } => {
                        let result = match eval(&play_script(&url)).join::<bool>().await {
                            Ok(true) => Ok(()),
                            Ok(false) => Err(PlaybackError::Load {
                                url,
                                reason: "the recording could not be played".into(),
                            }),
                            Err(err) => Err(PlaybackError::Device(err.to_string())),
                        };
                        let _ = done.send(result);
                    }
                    AudioCommand::Stop { done } => {
                        let _ = eval(STOP_SCRIPT).await;
                        let _ = done.send(());
                    }
                }
            }
        });
        Arc::new(WebviewAudio { commands })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_script_quotes_the_url() {
        let url = Url::parse("http://localhost:8000/static/audio/cat.mp3").unwrap();
        let script = play_script(&url);
        assert!(script.contains(r#"audio.src = "http://localhost:8000/static/audio/cat.mp3";"#));
        assert!(script.contains("audio.currentTime = 0;"));
    }

    #[tokio::test]
    async fn stopped_runner_degrades_play() {
        let (commands, rx) = mpsc::unbounded_channel();
        drop(rx);
        let audio = WebviewAudio { commands };
        let url = Url::parse("http://localhost:8000/a.mp3").unwrap();
        assert!(matches!(
            audio.play(&url).await,
            Err(PlaybackError::Device(_))
        ));
        audio.stop().await;
    }
}
