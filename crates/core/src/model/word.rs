use thiserror::Error;
use url::Url;

use crate::model::ids::WordId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("word {id} has no target-language text")]
    EmptyTargetText { id: WordId },
}

/// A vocabulary item served by the word service for one quiz round.
///
/// Immutable once fetched; the round that owns it discards it on advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    id: WordId,
    target_text: String,
    native_text: String,
    audio_path: String,
}

impl Word {
    /// # Errors
    ///
    /// Returns `WordError::EmptyTargetText` if the target text is blank.
    pub fn new(
        id: WordId,
        target_text: impl Into<String>,
        native_text: impl Into<String>,
        audio_path: impl Into<String>,
    ) -> Result<Self, WordError> {
        let target_text = target_text.into().trim().to_owned();
        if target_text.is_empty() {
            return Err(WordError::EmptyTargetText { id });
        }
        Ok(Self {
            id,
            target_text,
            native_text: native_text.into().trim().to_owned(),
            audio_path: audio_path.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> WordId {
        self.id
    }

    /// Text in the language being learned.
    #[must_use]
    pub fn target_text(&self) -> &str {
        &self.target_text
    }

    /// Text in the learner's own language; this is the prompt shown above the choices.
    #[must_use]
    pub fn native_text(&self) -> &str {
        &self.native_text
    }

    /// Server-relative path of the pronunciation recording.
    #[must_use]
    pub fn audio_path(&self) -> &str {
        &self.audio_path
    }

    /// Absolute pronunciation URL under the media server `origin`.
    ///
    /// Returns `None` when the word has no recording or the result is not a
    /// valid URL. Paths that are already absolute URLs are used unchanged.
    #[must_use]
    pub fn audio_url(&self, origin: &Url) -> Option<Url> {
        let path = self.audio_path.trim();
        if path.is_empty() {
            return None;
        }
        if let Ok(absolute) = Url::parse(path) {
            return Some(absolute);
        }
        let base = origin.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}")).ok()
    }
}
