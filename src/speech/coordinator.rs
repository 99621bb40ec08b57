//! Playback coordination
//!
//! The coordinator owns the single active-playback slot: which article,
//! if any, is currently speaking, and the handle that can stop it. All
//! playback transitions go through `toggle_speak`, which guarantees that
//! at most one article produces audio at a time.

use crate::article::ArticleId;
use crate::language::Language;
use crate::{NewsrushError, Result};
use log::{debug, info, warn};

/// A live utterance that can be stopped and observed for completion
///
/// Stopping releases the underlying audio resource. `stop` is idempotent;
/// once a handle is stopped or has finished, further calls are no-ops.
pub trait PlaybackHandle {
    /// Halt playback and release the audio resource
    fn stop(&mut self);

    /// True once the utterance finished playing unassisted
    fn is_finished(&self) -> bool;
}

/// One strategy for turning text into audible speech
///
/// Providers are tried in order by the coordinator; returning an error
/// hands the utterance to the next provider in the chain.
pub trait SpeechProvider {
    /// Short name for logs and status lines
    fn name(&self) -> &'static str;

    /// Synthesize and start playing the utterance, returning its handle
    fn synthesize(&mut self, text: &str, language: Language) -> Result<Box<dyn PlaybackHandle>>;
}

/// What a toggle request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Playback started through the named provider
    Started { provider: &'static str },
    /// The article was already speaking and has been stopped
    Stopped,
}

/// The single active utterance, if any
struct ActiveUtterance {
    article: ArticleId,
    handle: Box<dyn PlaybackHandle>,
}

/// Owns the active-playback slot and the provider chain
pub struct PlaybackCoordinator {
    providers: Vec<Box<dyn SpeechProvider>>,
    active: Option<ActiveUtterance>,
}

impl PlaybackCoordinator {
    pub fn new(providers: Vec<Box<dyn SpeechProvider>>) -> Self {
        Self {
            providers,
            active: None,
        }
    }

    /// Article currently speaking, if any
    pub fn active_article(&self) -> Option<ArticleId> {
        self.active.as_ref().map(|active| active.article)
    }

    /// Names of the configured providers, in fallback order
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Start or stop speaking an article
    ///
    /// Toggling the active article stops it. Toggling any other article
    /// first tears down whatever is speaking, then walks the provider
    /// chain until one starts playback. If every provider fails, the
    /// slot is left empty and the error is returned for display.
    pub fn toggle_speak(
        &mut self,
        article: ArticleId,
        title: &str,
        description: &str,
        language: Language,
    ) -> Result<ToggleOutcome> {
        // Toggle-off: the requested article is the one speaking
        if self.active_article() == Some(article) {
            self.stop();
            return Ok(ToggleOutcome::Stopped);
        }

        // Single-speaker invariant: whatever is active stops before any
        // new playback starts, on the fallback path included
        self.stop();

        let text = utterance_text(title, description);
        for provider in &mut self.providers {
            match provider.synthesize(&text, language) {
                Ok(handle) => {
                    info!("Speaking {} via {}", article, provider.name());
                    let name = provider.name();
                    self.active = Some(ActiveUtterance { article, handle });
                    return Ok(ToggleOutcome::Started { provider: name });
                }
                Err(e) => {
                    // Provider failure falls through to the next strategy
                    warn!("Speech provider {} failed: {}", provider.name(), e);
                }
            }
        }

        Err(NewsrushError::Speech(
            "text-to-speech is not available".to_string(),
        ))
    }

    /// Stop the active utterance, if any, and clear the slot
    pub fn stop(&mut self) {
        if let Some(mut active) = self.active.take() {
            debug!("Stopping playback of {}", active.article);
            active.handle.stop();
        }
    }

    /// Clear the slot if the active utterance finished on its own
    ///
    /// Called from the event loop between commands. Returns the article
    /// whose playback just completed, if any. Dropping the handle after
    /// the slot is cleared makes a later stop request a no-op.
    pub fn poll_finished(&mut self) -> Option<ArticleId> {
        if let Some(active) = &self.active {
            if active.handle.is_finished() {
                let article = active.article;
                debug!("Playback of {} finished", article);
                self.active = None;
                return Some(article);
            }
        }
        None
    }
}

/// Build the utterance text spoken for an article
///
/// Title and description are joined with a sentence break; an empty
/// description yields just the title.
pub fn utterance_text(title: &str, description: &str) -> String {
    if description.is_empty() {
        format!("{}.", title)
    } else {
        format!("{}. {}", title, description)
    }
}
