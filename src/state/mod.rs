//! Application state management
//!
//! The State struct wires the reader together: configuration, session
//! gate, language selection, the news client, the translation
//! controller that owns the article list, and the playback coordinator
//! that owns the active-speech slot.

pub mod config;

use crate::article::Article;
use crate::language::Language;
use crate::news::NewsClient;
use crate::session::Session;
use crate::speech::{self, PlaybackCoordinator, ToggleOutcome};
use crate::translate::{GoogleTranslator, RefreshOutcome, TranslationController};
use crate::{NewsrushError, Result};
use config::Config;
use log::info;

/// Central application state
pub struct State {
    /// Configuration loaded from ~/.newsrush.cfg
    pub config: Config,

    /// External identity gate; displayed only, no feature depends on it
    pub session: Session,

    /// Currently selected display language
    ///
    /// Created at startup with the source language and mutated only by
    /// explicit user selection. Never persisted.
    pub language: Language,

    /// News search client
    news: NewsClient,

    /// Owns the article list and all translation passes
    pub controller: TranslationController,

    /// Owns the single active-playback slot
    pub coordinator: PlaybackCoordinator,
}

impl State {
    /// Load configuration and wire up all collaborators
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        info!("Configuration loaded from {:?}", config.path());
        info!("  Voices: {}", config.voices.len());
        info!("  Page size: {}", config.page_size());

        let news = NewsClient::new(config.news_api_key(), config.page_size());
        let controller = TranslationController::new(Box::new(GoogleTranslator::new()));
        let coordinator = PlaybackCoordinator::new(speech::provider_chain(&config));
        info!(
            "Speech providers: {:?}",
            coordinator.provider_names()
        );

        Ok(Self {
            config,
            session: Session::new(),
            language: Language::English,
            news,
            controller,
            coordinator,
        })
    }

    /// Fetch articles for a query and hand them to the controller
    ///
    /// A fetch failure empties the list (stale results would otherwise
    /// masquerade as fresh ones). When a non-source language is
    /// selected, the new list is translated into it right away.
    pub fn fetch(&mut self, query: &str) -> Result<usize> {
        match self.news.search(query) {
            Ok(articles) => {
                let count = articles.len();
                self.controller.set_articles(articles);
                if self.language != self.controller.source_language() {
                    self.controller.refresh(self.language)?;
                }
                Ok(count)
            }
            Err(e) => {
                self.controller.set_articles(Vec::new());
                Err(e)
            }
        }
    }

    /// Select a display language and refresh the list into it
    pub fn set_language(&mut self, language: Language) -> Result<RefreshOutcome> {
        self.language = language;
        self.controller.refresh(language)
    }

    /// Toggle speech for the article at a 1-based list position
    ///
    /// The position is resolved to the article's durable id before it
    /// reaches the coordinator, so playback bookkeeping survives list
    /// changes.
    pub fn toggle_speak(&mut self, position: usize) -> Result<ToggleOutcome> {
        let article = self.article_at(position)?;
        let id = article.id;
        let title = article.title.clone();
        let description = article.description.clone();
        self.coordinator
            .toggle_speak(id, &title, &description, self.language)
    }

    /// Source URL for the article at a 1-based list position
    pub fn article_url(&self, position: usize) -> Result<&str> {
        Ok(&self.article_at(position)?.source_url)
    }

    fn article_at(&self, position: usize) -> Result<&Article> {
        position
            .checked_sub(1)
            .and_then(|index| self.controller.articles().get(index))
            .ok_or_else(|| {
                NewsrushError::Other(format!("no article at position {}", position))
            })
    }
}
