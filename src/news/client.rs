//! NewsAPI client
//!
//! Thin client for the NewsAPI "everything" search endpoint. The server
//! wraps results in an envelope with a status field; anything other than
//! "ok" is reported as a news error carrying the server's message.

use crate::article::{Article, ArticleId};
use crate::http;
use crate::{NewsrushError, Result};
use log::{debug, info, warn};
use serde::Deserialize;

const SEARCH_URL: &str = "https://newsapi.org/v2/everything";

/// Response envelope returned by the search endpoint
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

/// One article as the API returns it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
}

/// Client for the news search endpoint
pub struct NewsClient {
    api_key: String,
    page_size: u32,
    /// Next id to hand out; ids stay unique across fetches so stale
    /// playback bookkeeping can never match a new article
    next_id: u64,
}

impl NewsClient {
    pub fn new(api_key: String, page_size: u32) -> Self {
        Self {
            api_key,
            page_size,
            next_id: 1,
        }
    }

    /// Search for articles matching a free-text query
    ///
    /// Returns the fetched articles with fresh durable ids and their
    /// original text seeded from the response.
    pub fn search(&mut self, query: &str) -> Result<Vec<Article>> {
        if self.api_key.trim().is_empty() {
            return Err(NewsrushError::News(
                "no news API key configured (set api_key in the [news] section)".to_string(),
            ));
        }

        let url = format!(
            "{}?q={}&pageSize={}&apiKey={}",
            SEARCH_URL,
            urlencoding::encode(query),
            self.page_size,
            self.api_key
        );
        debug!("Fetching news for query '{}'", query);

        let response = http::AGENT
            .get(&url)
            .call()
            .map_err(|e| NewsrushError::News(format!("request failed: {}", e)))?;

        let envelope: Envelope = response
            .into_body()
            .read_json()
            .map_err(|e| NewsrushError::News(format!("bad response: {}", e)))?;

        if envelope.status != "ok" {
            let message = envelope
                .message
                .unwrap_or_else(|| "news API error".to_string());
            return Err(NewsrushError::News(message));
        }

        let articles = self.build_articles(envelope.articles);
        info!("Fetched {} articles for '{}'", articles.len(), query);
        Ok(articles)
    }

    /// Convert raw API entries into articles, skipping unusable ones
    fn build_articles(&mut self, raw: Vec<RawArticle>) -> Vec<Article> {
        let mut articles = Vec::with_capacity(raw.len());
        for entry in raw {
            let (title, url) = match (entry.title, entry.url) {
                (Some(t), Some(u)) if !t.trim().is_empty() => (t, u),
                _ => {
                    warn!("Skipping article with no title or URL");
                    continue;
                }
            };
            let id = ArticleId(self.next_id);
            self.next_id += 1;
            articles.push(Article::new(
                id,
                title,
                entry.description.unwrap_or_default(),
                url,
                entry.url_to_image.filter(|u| !u.is_empty()),
            ));
        }
        articles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_ok_decodes() {
        let body = r#"{
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "title": "Headline",
                "description": "Body",
                "url": "https://example.com/story",
                "urlToImage": "https://example.com/img.png"
            }]
        }"#;
        let envelope: Envelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.status, "ok");
        assert_eq!(envelope.articles.len(), 1);
        assert_eq!(envelope.articles[0].title.as_deref(), Some("Headline"));
    }

    #[test]
    fn test_envelope_error_decodes() {
        let body = r#"{"status": "error", "code": "apiKeyInvalid", "message": "bad key"}"#;
        let envelope: Envelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.status, "error");
        assert_eq!(envelope.message.as_deref(), Some("bad key"));
        assert!(envelope.articles.is_empty());
    }

    #[test]
    fn test_untitled_entries_skipped() {
        let raw = vec![
            RawArticle {
                title: Some("Kept".to_string()),
                description: None,
                url: Some("https://example.com/1".to_string()),
                url_to_image: Some(String::new()),
            },
            RawArticle {
                title: None,
                description: Some("orphan".to_string()),
                url: Some("https://example.com/2".to_string()),
                url_to_image: None,
            },
        ];
        let mut client = NewsClient::new("k".to_string(), 20);
        let articles = client.build_articles(raw);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Kept");
        // Empty image URLs are normalized to none
        assert!(articles[0].image_url.is_none());
        // Missing description becomes empty displayed text, not an error
        assert_eq!(articles[0].description, "");
    }

    #[test]
    fn test_ids_unique_across_fetches() {
        let mut client = NewsClient::new("k".to_string(), 20);
        let first = client.build_articles(vec![RawArticle {
            title: Some("One".to_string()),
            description: None,
            url: Some("https://example.com/1".to_string()),
            url_to_image: None,
        }]);
        let second = client.build_articles(vec![RawArticle {
            title: Some("Two".to_string()),
            description: None,
            url: Some("https://example.com/2".to_string()),
            url_to_image: None,
        }]);
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let mut client = NewsClient::new(String::new(), 20);
        assert!(client.search("india").is_err());
    }
}
