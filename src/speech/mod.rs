//! Speech synthesis system

pub mod coordinator;
pub mod providers;

pub use coordinator::{
    utterance_text, PlaybackCoordinator, PlaybackHandle, SpeechProvider, ToggleOutcome,
};

use crate::state::config::Config;
use log::info;

/// Build the provider chain from configuration, in fallback order
///
/// The hosted provider joins the chain only when an API key is
/// configured; the on-device provider joins whenever the platform
/// offers a synthesis engine. An empty chain is legal and makes every
/// speak request fail with a user-visible error.
pub fn provider_chain(config: &Config) -> Vec<Box<dyn SpeechProvider>> {
    let mut chain: Vec<Box<dyn SpeechProvider>> = Vec::new();

    let api_key = config.elevenlabs_api_key();
    if api_key.trim().is_empty() {
        info!("No ElevenLabs API key configured, hosted TTS disabled");
    } else {
        info!("✓ Hosted TTS enabled");
        chain.push(Box::new(providers::ElevenLabsProvider::new(
            api_key,
            config.elevenlabs_model(),
            config.voice_map(),
        )));
    }

    info!("Trying on-device TTS backend...");
    match providers::DeviceProvider::new(config.rate(), config.volume()) {
        Ok(provider) => {
            info!("✓ On-device TTS backend available");
            chain.push(Box::new(provider));
        }
        Err(e) => {
            info!("✗ On-device TTS unavailable: {}", e);
        }
    }

    chain
}
