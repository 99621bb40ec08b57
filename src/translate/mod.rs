//! Translation system

pub mod controller;
pub mod google;

pub use controller::{RefreshOutcome, TranslationController};
pub use google::{GoogleTranslator, Translator};
