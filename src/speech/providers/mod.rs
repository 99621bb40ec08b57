//! Speech provider strategies
//!
//! Providers implement the common `SpeechProvider` interface and are
//! tried by the coordinator in fallback order: the hosted neural TTS
//! first, then on-device synthesis.

pub mod device;
pub mod elevenlabs;

pub use device::DeviceProvider;
pub use elevenlabs::ElevenLabsProvider;
