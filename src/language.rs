//! Display languages supported by the reader
//!
//! The set matches the languages the translation source and the voice
//! mappings are configured for. Article text arrives in the source
//! language (English) and is translated into whichever of these the
//! user selects.

use crate::{NewsrushError, Result};
use std::fmt;
use std::str::FromStr;

/// A display language the reader can translate into and speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Hindi,
    Punjabi,
    Gujarati,
    Tamil,
    German,
    French,
    Spanish,
}

impl Language {
    /// All supported languages, in menu order
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Hindi,
        Language::Punjabi,
        Language::Gujarati,
        Language::Tamil,
        Language::German,
        Language::French,
        Language::Spanish,
    ];

    /// ISO 639-1 code used by the translation endpoint
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Punjabi => "pa",
            Language::Gujarati => "gu",
            Language::Tamil => "ta",
            Language::German => "de",
            Language::French => "fr",
            Language::Spanish => "es",
        }
    }

    /// BCP 47 locale tag for on-device speech synthesis
    ///
    /// Indic languages map to their Indian locales, the rest to their
    /// primary national locale.
    pub fn locale(self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Hindi => "hi-IN",
            Language::Punjabi => "pa-IN",
            Language::Gujarati => "gu-IN",
            Language::Tamil => "ta-IN",
            Language::German => "de-DE",
            Language::French => "fr-FR",
            Language::Spanish => "es-ES",
        }
    }

    /// Human-readable name for menus and status lines
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Punjabi => "Punjabi",
            Language::Gujarati => "Gujarati",
            Language::Tamil => "Tamil",
            Language::German => "German",
            Language::French => "French",
            Language::Spanish => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = NewsrushError;

    /// Parse a language from its ISO code or English name (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == lower || lang.name().to_lowercase() == lower)
            .ok_or_else(|| NewsrushError::Language(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_code() {
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert_eq!("ta".parse::<Language>().unwrap(), Language::Tamil);
    }

    #[test]
    fn test_parse_by_name() {
        assert_eq!("German".parse::<Language>().unwrap(), Language::German);
        assert_eq!("punjabi".parse::<Language>().unwrap(), Language::Punjabi);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("tlh".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_locales_cover_all_languages() {
        for lang in Language::ALL {
            assert!(lang.locale().contains('-'), "{} has no locale", lang);
            assert!(lang.locale().starts_with(lang.code()) || lang == Language::English);
        }
    }
}
