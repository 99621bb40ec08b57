//! Article data model
//!
//! Each article carries the text currently displayed plus a write-once
//! copy of the text as it was first fetched. Translation always derives
//! from the original copy, so repeated language switches can never
//! compound earlier translations.

use std::fmt;

/// Durable identifier for one fetched article
///
/// Ids are assigned at fetch time and survive list reordering, so
/// playback bookkeeping is never keyed by list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticleId(pub u64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Title and description exactly as first observed for this article
///
/// Populated once in `Article::new` and never written again for the
/// lifetime of the fetch. There is intentionally no mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalText {
    title: String,
    description: String,
}

impl OriginalText {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One news item as displayed in the list
#[derive(Debug, Clone)]
pub struct Article {
    /// Durable id assigned at fetch time
    pub id: ArticleId,

    /// Displayed title, rewritten by translation passes
    pub title: String,

    /// Displayed description, rewritten by translation passes
    pub description: String,

    /// Text as first fetched, the sole source for every translation
    pub original: OriginalText,

    /// Illustration URL, if the source provided one
    pub image_url: Option<String>,

    /// Link to the full article
    pub source_url: String,
}

impl Article {
    /// Create an article from freshly fetched text
    ///
    /// Seeds the original copy from the fetched title/description. This
    /// is the only place the original fields are ever written.
    pub fn new(
        id: ArticleId,
        title: String,
        description: String,
        source_url: String,
        image_url: Option<String>,
    ) -> Self {
        let original = OriginalText {
            title: title.clone(),
            description: description.clone(),
        };
        Self {
            id,
            title,
            description,
            original,
            image_url,
            source_url,
        }
    }

    /// Restore displayed text from the original copy
    pub fn restore_original(&mut self) {
        self.title = self.original.title().to_string();
        self.description = self.original.description().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, desc: &str) -> Article {
        Article::new(
            ArticleId(1),
            title.to_string(),
            desc.to_string(),
            "https://example.com/a".to_string(),
            None,
        )
    }

    #[test]
    fn test_original_seeded_from_fetch() {
        let a = article("Title", "Desc");
        assert_eq!(a.original.title(), "Title");
        assert_eq!(a.original.description(), "Desc");
    }

    #[test]
    fn test_restore_after_rewrite() {
        let mut a = article("Title", "Desc");
        a.title = "Titre".to_string();
        a.description = "La desc".to_string();

        a.restore_original();
        assert_eq!(a.title, "Title");
        assert_eq!(a.description, "Desc");
    }

    #[test]
    fn test_original_survives_repeated_rewrites() {
        let mut a = article("A", "B");
        for pass in 0..3 {
            a.title = format!("A_{}", pass);
            a.description = format!("B_{}", pass);
            assert_eq!(a.original.title(), "A");
            assert_eq!(a.original.description(), "B");
        }
    }
}
