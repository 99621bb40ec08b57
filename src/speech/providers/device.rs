//! On-device speech synthesis provider
//!
//! Fallback provider using the `tts` crate, which binds the platform's
//! native synthesis engine (Speech Dispatcher on Linux, AVFoundation on
//! macOS, SAPI on Windows). Voices are matched against the fixed
//! language-to-locale table; when no matching voice exists, the
//! platform's default voice speaks the text anyway.

use crate::language::Language;
use crate::speech::coordinator::{PlaybackHandle, SpeechProvider};
use crate::{NewsrushError, Result};
use log::{debug, error, warn};
use tts::Tts as TtsCrate;

/// Speech provider backed by the platform's synthesis engine
pub struct DeviceProvider {
    tts: TtsCrate,
}

impl DeviceProvider {
    /// Initialize the platform TTS engine and apply configured settings
    pub fn new(rate: Option<u8>, volume: Option<u8>) -> Result<Self> {
        debug!("Creating on-device TTS backend");

        let mut tts = TtsCrate::default()
            .map_err(|e| NewsrushError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        let features = tts.supported_features();
        if let Some(rate) = rate {
            if features.rate {
                tts.set_rate(rate as f32)
                    .map_err(|e| NewsrushError::Speech(format!("Failed to set rate: {}", e)))?;
            } else {
                warn!("Rate control not supported on this platform");
            }
        }
        if let Some(volume) = volume {
            if features.volume {
                tts.set_volume(volume as f32 / 100.0)
                    .map_err(|e| NewsrushError::Speech(format!("Failed to set volume: {}", e)))?;
            } else {
                warn!("Volume control not supported on this platform");
            }
        }

        Ok(Self { tts })
    }

    /// Switch to a voice matching the language's locale, if one exists
    ///
    /// Prefers an exact locale match (hi-IN), then any voice whose
    /// primary language matches (hi). Best effort; failure to switch
    /// leaves the current voice in place.
    fn select_voice(&mut self, language: Language) {
        let features = self.tts.supported_features();
        if !features.voice {
            return;
        }

        let voices = match self.tts.voices() {
            Ok(voices) => voices,
            Err(e) => {
                warn!("Failed to list voices: {}", e);
                return;
            }
        };

        let locale = language.locale();
        let preferred = voices
            .iter()
            .find(|voice| voice.language().as_str().eq_ignore_ascii_case(locale))
            .or_else(|| {
                voices
                    .iter()
                    .find(|voice| voice.language().primary_language() == language.code())
            });

        if let Some(voice) = preferred {
            debug!("Selecting voice {:?} for {}", voice.name(), locale);
            if let Err(e) = self.tts.set_voice(voice) {
                warn!("Failed to set voice: {}", e);
            }
        } else {
            debug!("No voice for {}, keeping current voice", locale);
        }
    }
}

impl SpeechProvider for DeviceProvider {
    fn name(&self) -> &'static str {
        "on-device"
    }

    fn synthesize(&mut self, text: &str, language: Language) -> Result<Box<dyn PlaybackHandle>> {
        self.select_voice(language);

        // interrupt = true cancels any in-flight utterance, so a
        // superseded request can never keep speaking underneath
        self.tts.speak(text, true).map_err(|e| {
            error!("Failed to speak: {}", e);
            NewsrushError::Speech(format!("Speak failed: {}", e))
        })?;

        let can_query = self.tts.supported_features().is_speaking;
        Ok(Box::new(DeviceHandle {
            tts: self.tts.clone(),
            can_query,
            stopped: false,
        }))
    }
}

/// Handle for an utterance running on the platform engine
struct DeviceHandle {
    tts: TtsCrate,
    /// Whether the platform can report speaking state
    can_query: bool,
    stopped: bool,
}

impl PlaybackHandle for DeviceHandle {
    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Err(e) = self.tts.stop() {
            error!("Failed to cancel speech: {}", e);
        }
    }

    fn is_finished(&self) -> bool {
        if self.stopped {
            return true;
        }
        if !self.can_query {
            // Platform cannot report completion; the utterance stays
            // active until the user toggles it off
            return false;
        }
        !self.tts.is_speaking().unwrap_or(true)
    }
}
