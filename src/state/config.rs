//! Configuration management

use crate::language::Language;
use crate::{NewsrushError, Result};
use ini::Ini;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default ElevenLabs voice for English, used when no voice map entry
/// covers the selected language
const DEFAULT_ENGLISH_VOICE: &str = "21m00Tcm4TlvDq8ikWAM";

/// Application configuration for the news reader
///
/// Manages persistent settings: the news API credential and defaults,
/// speech parameters, and the per-language voice map for hosted TTS.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.newsrush.cfg)
    path: PathBuf,

    /// Voice map (language -> ElevenLabs voice id)
    pub voices: HashMap<Language, String>,
}

impl Config {
    /// Load configuration from the home directory or create default
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path, creating it with
    /// defaults when missing
    pub fn load_from(path: PathBuf) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| NewsrushError::Config(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| NewsrushError::Config(format!("Failed to write config: {}", e)))?;
            default
        };

        let mut config = Self {
            ini,
            path,
            voices: HashMap::new(),
        };
        config.parse_voices();

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| NewsrushError::Config(format!("Failed to save config: {}", e)))
    }

    /// Config file path (~/.newsrush.cfg)
    fn config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".newsrush.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("news"))
            .set("api_key", "")
            .set("page_size", "20")
            .set("default_query", "india");

        ini.with_section(Some("speech"))
            .set("elevenlabs_api_key", "")
            .set("elevenlabs_model", "eleven_multilingual_v1");

        ini.with_section(Some("voices"))
            .set("en", DEFAULT_ENGLISH_VOICE);

        ini
    }

    /// Parse the voice map from config
    ///
    /// Keys are language codes; unknown codes are skipped so a stale
    /// entry cannot break loading.
    fn parse_voices(&mut self) {
        if let Some(section) = self.ini.section(Some("voices")) {
            for (code, voice_id) in section.iter() {
                match code.parse::<Language>() {
                    Ok(language) if !voice_id.trim().is_empty() => {
                        self.voices.insert(language, voice_id.to_string());
                    }
                    _ => debug!("Skipping voice entry for unknown language '{}'", code),
                }
            }
        }
        debug!("Loaded {} voices", self.voices.len());
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // News reader-specific configuration getters

    /// News API credential
    pub fn news_api_key(&self) -> String {
        self.get_string("news", "api_key", "")
    }

    /// Articles requested per search
    pub fn page_size(&self) -> u32 {
        self.get_int("news", "page_size", 20).max(1) as u32
    }

    /// Query fetched at startup
    pub fn default_query(&self) -> String {
        self.get_string("news", "default_query", "india")
    }

    /// ElevenLabs API credential for hosted TTS
    pub fn elevenlabs_api_key(&self) -> String {
        self.get_string("speech", "elevenlabs_api_key", "")
    }

    /// ElevenLabs model id for synthesis requests
    pub fn elevenlabs_model(&self) -> String {
        self.get_string("speech", "elevenlabs_model", "eleven_multilingual_v1")
    }

    /// Speech rate for on-device synthesis (0-100)
    pub fn rate(&self) -> Option<u8> {
        self.get_int("speech", "rate", -1)
            .try_into()
            .ok()
            .filter(|&r| r <= 100)
    }

    /// Speech volume for on-device synthesis (0-100)
    pub fn volume(&self) -> Option<u8> {
        self.get_int("speech", "volume", -1)
            .try_into()
            .ok()
            .filter(|&v| v <= 100)
    }

    /// Copy of the per-language voice map
    pub fn voice_map(&self) -> HashMap<Language, String> {
        self.voices.clone()
    }
}
