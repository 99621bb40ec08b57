//! ElevenLabs hosted TTS provider
//!
//! Primary provider. Synthesizes the utterance through the ElevenLabs
//! HTTP API with a per-language voice id, decodes the returned MP3, and
//! plays it through the default audio output device. Any failure along
//! that path (missing key or voice, HTTP error, decode error, no audio
//! device) is reported to the coordinator, which falls back to the next
//! provider.

use crate::http;
use crate::language::Language;
use crate::speech::coordinator::{PlaybackHandle, SpeechProvider};
use crate::{NewsrushError, Result};
use log::debug;
use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

const TTS_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";

/// Hosted neural TTS provider
pub struct ElevenLabsProvider {
    api_key: String,
    model: String,
    /// Configured language-to-voice-id map
    voices: HashMap<Language, String>,
}

impl ElevenLabsProvider {
    pub fn new(api_key: String, model: String, voices: HashMap<Language, String>) -> Self {
        Self {
            api_key,
            model,
            voices,
        }
    }

    /// Voice id for the language, falling back to the English voice
    fn voice_for(&self, language: Language) -> Result<&str> {
        self.voices
            .get(&language)
            .or_else(|| self.voices.get(&Language::English))
            .map(String::as_str)
            .ok_or_else(|| {
                NewsrushError::Speech(format!(
                    "no voice configured for {} and no English fallback",
                    language.name()
                ))
            })
    }

    /// Request synthesized audio for the utterance text
    fn fetch_audio(&self, voice_id: &str, text: &str) -> Result<Vec<u8>> {
        let url = format!("{}/{}", TTS_URL, voice_id);
        let payload = serde_json::json!({
            "text": text,
            "model_id": self.model,
        });

        let response = http::AGENT
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .send_json(payload)
            .map_err(|e| NewsrushError::Speech(format!("TTS request failed: {}", e)))?;

        response
            .into_body()
            .read_to_vec()
            .map_err(|e| NewsrushError::Speech(format!("TTS response read failed: {}", e)))
    }
}

impl SpeechProvider for ElevenLabsProvider {
    fn name(&self) -> &'static str {
        "elevenlabs"
    }

    fn synthesize(&mut self, text: &str, language: Language) -> Result<Box<dyn PlaybackHandle>> {
        if self.api_key.trim().is_empty() {
            return Err(NewsrushError::Speech(
                "no ElevenLabs API key configured".to_string(),
            ));
        }

        let voice_id = self.voice_for(language)?.to_string();
        let audio = self.fetch_audio(&voice_id, text)?;
        debug!("Fetched {} bytes of audio for voice {}", audio.len(), voice_id);

        let (samples, sample_rate) = decode_mp3(&audio)?;
        let handle = start_playback(samples, sample_rate)?;
        Ok(Box::new(handle))
    }
}

/// Decode MP3 bytes into mono 16-bit samples
///
/// Stereo frames are averaged down to mono; the sample rate is taken
/// from the first frame.
fn decode_mp3(bytes: &[u8]) -> Result<(Vec<i16>, u32)> {
    use minimp3::{Decoder, Frame};

    let mut decoder = Decoder::new(Cursor::new(bytes));
    let mut samples: Vec<i16> = Vec::new();
    let mut sample_rate = 0u32;

    loop {
        match decoder.next_frame() {
            Ok(Frame {
                data,
                sample_rate: rate,
                channels,
                ..
            }) => {
                if sample_rate == 0 {
                    sample_rate = rate as u32;
                }
                if channels == 2 {
                    samples.extend(
                        data.chunks(2)
                            .map(|pair| ((pair[0] as i32 + pair[1] as i32) / 2) as i16),
                    );
                } else {
                    samples.extend(data);
                }
            }
            Err(minimp3::Error::Eof) => break,
            Err(e) => {
                return Err(NewsrushError::Speech(format!("audio decode failed: {:?}", e)));
            }
        }
    }

    if samples.is_empty() || sample_rate == 0 {
        return Err(NewsrushError::Speech("empty audio response".to_string()));
    }
    Ok((samples, sample_rate))
}

/// Start playing decoded samples through the default output device
fn start_playback(samples: Vec<i16>, sample_rate: u32) -> Result<ElevenLabsHandle> {
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| NewsrushError::Speech("no audio output device".to_string()))?;

    let queue: Arc<Mutex<VecDeque<i16>>> = Arc::new(Mutex::new(VecDeque::from(samples)));
    let feed = queue.clone();

    // Stereo output with the mono sample mirrored to both channels;
    // mono-only configurations are rare on output devices
    let config = cpal::StreamConfig {
        channels: 2,
        sample_rate: cpal::SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut queue = match feed.lock() {
                    Ok(queue) => queue,
                    Err(_) => {
                        data.fill(0.0);
                        return;
                    }
                };
                for frame in data.chunks_mut(2) {
                    let sample = queue.pop_front().unwrap_or(0);
                    let value = sample as f32 / 32768.0;
                    for out in frame.iter_mut() {
                        *out = value;
                    }
                }
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )
        .map_err(|e| NewsrushError::Speech(format!("audio stream failed: {}", e)))?;

    stream
        .play()
        .map_err(|e| NewsrushError::Speech(format!("audio start failed: {}", e)))?;

    Ok(ElevenLabsHandle {
        queue,
        stream: Some(stream),
    })
}

/// Handle for audio playing through the output stream
///
/// Stopping drops the stream and clears the queue; the sample queue
/// draining to empty marks natural completion.
struct ElevenLabsHandle {
    queue: Arc<Mutex<VecDeque<i16>>>,
    stream: Option<cpal::Stream>,
}

impl PlaybackHandle for ElevenLabsHandle {
    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Ok(mut queue) = self.queue.lock() {
                queue.clear();
            }
            drop(stream);
        }
    }

    fn is_finished(&self) -> bool {
        self.queue.lock().map(|queue| queue.is_empty()).unwrap_or(true)
    }
}
