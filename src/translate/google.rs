//! Translation source
//!
//! The reader translates article text with the public Google Translate
//! "gtx" endpoint. Article text always arrives in English, so the source
//! language is pinned rather than auto-detected.

use crate::http;
use crate::language::Language;
use crate::{NewsrushError, Result};
use log::debug;

/// A text translation source
///
/// Implementations take non-empty source text and a target language and
/// return the translated text. The refresh controller only talks to this
/// trait, so tests substitute a deterministic stub.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, target: Language) -> Result<String>;
}

/// Translator backed by the unofficial Google Translate gtx endpoint
pub struct GoogleTranslator;

impl GoogleTranslator {
    pub fn new() -> Self {
        Self
    }

    fn request_url(text: &str, target: Language) -> String {
        format!(
            "https://translate.googleapis.com/translate_a/single?client=gtx&sl=en&tl={}&dt=t&q={}",
            target.code(),
            urlencoding::encode(text)
        )
    }

    /// Concatenate the sentence segments from the gtx response
    ///
    /// The endpoint returns a nested array; element 0 is a list of
    /// segments whose first entry is the translated sentence.
    fn extract_translation(json: &serde_json::Value) -> Option<String> {
        let segments = json.get(0)?.as_array()?;
        let mut full_text = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(|s| s.as_str()) {
                full_text.push_str(part);
            }
        }
        if full_text.is_empty() {
            None
        } else {
            Some(full_text)
        }
    }
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, target: Language) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }
        if target == Language::English {
            return Ok(text.to_string());
        }

        let url = Self::request_url(text, target);
        debug!("Translating {} chars into {}", text.len(), target);

        let response = http::AGENT
            .get(&url)
            .header("User-Agent", "Mozilla/5.0")
            .call()
            .map_err(|e| NewsrushError::Translate(format!("request failed: {}", e)))?;

        let json: serde_json::Value = response
            .into_body()
            .read_json()
            .map_err(|e| NewsrushError::Translate(format!("bad response: {}", e)))?;

        Self::extract_translation(&json)
            .ok_or_else(|| NewsrushError::Translate("empty translation response".to_string()))
    }
}
