//! Translation cache and refresh controller
//!
//! Owns the article list and keeps each article's displayed text
//! consistent with the selected display language. Displayed text is
//! always derived from the article's original copy, so switching
//! languages back and forth can never translate a translation.

use crate::article::{Article, ArticleId};
use crate::language::Language;
use crate::translate::Translator;
use crate::{NewsrushError, Result};
use log::{debug, info, warn};
use std::thread;

/// Result of one refresh pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Displayed text restored from the originals, no network involved
    Restored,
    /// Translation pass completed; `failed` articles kept their previous text
    Translated { translated: usize, failed: usize },
}

/// Owns the article list and drives translation passes over it
///
/// This is the only component that mutates article text. A refresh pass
/// holds `&mut self` for its full duration, so passes cannot interleave
/// and a stale pass can never overwrite a newer language selection.
pub struct TranslationController {
    articles: Vec<Article>,
    translator: Box<dyn Translator>,
    /// Language the news source delivers text in
    source: Language,
    busy: bool,
}

impl TranslationController {
    pub fn new(translator: Box<dyn Translator>) -> Self {
        Self {
            articles: Vec::new(),
            translator,
            source: Language::English,
            busy: false,
        }
    }

    /// Replace the list after a fresh fetch
    ///
    /// Original text is re-seeded by `Article::new` at fetch time, so the
    /// new list starts a new fetch cycle for the write-once invariant.
    pub fn set_articles(&mut self, articles: Vec<Article>) {
        info!("Article list replaced ({} articles)", articles.len());
        self.articles = articles;
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Look up an article by durable id
    pub fn find(&self, id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Language the originals are written in
    pub fn source_language(&self) -> Language {
        self.source
    }

    /// True while a refresh pass is running
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Re-derive every article's displayed text for the target language
    ///
    /// Restoring the source language is synchronous and idempotent. Any
    /// other target translates each article's ORIGINAL title and
    /// description concurrently, one worker per article; a failed article
    /// keeps its previous displayed text without affecting the rest. If
    /// every article fails the pass reports a general error, but updates
    /// that were applied are kept.
    pub fn refresh(&mut self, target: Language) -> Result<RefreshOutcome> {
        if target == self.source {
            for article in &mut self.articles {
                article.restore_original();
            }
            debug!("Restored {} articles to {}", self.articles.len(), target);
            return Ok(RefreshOutcome::Restored);
        }

        if self.articles.is_empty() {
            return Ok(RefreshOutcome::Translated {
                translated: 0,
                failed: 0,
            });
        }

        self.busy = true;
        info!(
            "Translating {} articles into {}",
            self.articles.len(),
            target.name()
        );

        // One worker per article, reading only the original text. Results
        // are applied per article in list order once all workers are done;
        // workers themselves may finish in any order.
        let translator = self.translator.as_ref();
        let results: Vec<Result<(String, String)>> = thread::scope(|scope| {
            let workers: Vec<_> = self
                .articles
                .iter()
                .map(|article| {
                    let title = article.original.title();
                    let description = article.original.description();
                    scope.spawn(move || translate_one(translator, title, description, target))
                })
                .collect();

            workers
                .into_iter()
                .map(|worker| {
                    worker.join().unwrap_or_else(|_| {
                        Err(NewsrushError::Translate("translation worker panicked".to_string()))
                    })
                })
                .collect()
        });

        let mut translated = 0;
        let mut failed = 0;
        for (article, result) in self.articles.iter_mut().zip(results) {
            match result {
                Ok((title, description)) => {
                    article.title = title;
                    article.description = description;
                    translated += 1;
                }
                Err(e) => {
                    // Keep the previous displayed text for this article only
                    warn!("Translation failed for {}: {}", article.id, e);
                    failed += 1;
                }
            }
        }

        self.busy = false;

        if translated == 0 && failed > 0 {
            return Err(NewsrushError::Translate(format!(
                "translation failed for all {} articles",
                failed
            )));
        }

        info!("Translated {} articles, {} failed", translated, failed);
        Ok(RefreshOutcome::Translated { translated, failed })
    }
}

/// Translate one article's original text
///
/// An empty description is passed through untouched; the translation
/// source expects non-empty text.
fn translate_one(
    translator: &dyn Translator,
    title: &str,
    description: &str,
    target: Language,
) -> Result<(String, String)> {
    let translated_title = translator.translate(title, target)?;
    let translated_description = if description.is_empty() {
        String::new()
    } else {
        translator.translate(description, target)?
    };
    Ok((translated_title, translated_description))
}
