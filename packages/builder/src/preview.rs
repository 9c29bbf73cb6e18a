//! # Preview Articles
//!
//! State for the article used to preview placeholder substitution.
//!
//! Fetching happens outside the builder: the host calls
//! [`PreviewState::begin_fetch`], performs the request however it likes and
//! hands the outcome to [`PreviewState::receive`]. A failed fetch only sets
//! the user-visible error; the document is never touched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::FetchError;

/// One article, flattened to placeholder name → value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewArticle {
    pub id: String,

    #[serde(flatten)]
    pub placeholders: BTreeMap<String, String>,
}

impl PreviewArticle {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            placeholders: BTreeMap::new(),
        }
    }

    pub fn with_placeholder(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.placeholders.insert(name.into(), value.into());
        self
    }
}

/// A placeholder offered for insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderEntry {
    pub name: String,

    /// Value in the current article
    pub value: String,

    /// Text to insert into a field, e.g. `{{title}}`
    pub insert_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    current_article_id: Option<String>,
    articles: Vec<PreviewArticle>,
    is_loading: bool,
    is_fetching_different_article: bool,
    has_no_articles: bool,
    error: Option<FetchError>,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_article_id(&self) -> Option<&str> {
        self.current_article_id.as_deref()
    }

    pub fn current_article(&self) -> Option<&PreviewArticle> {
        let id = self.current_article_id.as_deref()?;
        self.articles.iter().find(|article| article.id == id)
    }

    pub fn articles(&self) -> &[PreviewArticle] {
        &self.articles
    }

    /// First fetch in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// A fetch for another article in flight while one is already shown
    pub fn is_fetching_different_article(&self) -> bool {
        self.is_fetching_different_article
    }

    pub fn has_no_articles(&self) -> bool {
        self.has_no_articles
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Mark a fetch as started; `article_id` picks a specific article
    pub fn begin_fetch(&mut self, article_id: Option<String>) {
        let showing_article = self.current_article().is_some();

        if let Some(id) = article_id {
            self.current_article_id = Some(id);
        }

        self.is_loading = !showing_article;
        self.is_fetching_different_article = showing_article;
    }

    /// Apply the outcome of a fetch
    ///
    /// The first returned article becomes current when none was chosen yet.
    pub fn receive(&mut self, result: Result<Vec<PreviewArticle>, FetchError>) {
        self.is_loading = false;
        self.is_fetching_different_article = false;

        match result {
            Ok(articles) => {
                self.error = None;
                self.has_no_articles = articles.is_empty();

                if self.current_article_id.is_none() {
                    self.current_article_id = articles.first().map(|article| article.id.clone());
                }

                // Keep articles fetched earlier so switching back is instant
                for article in articles {
                    match self.articles.iter_mut().find(|known| known.id == article.id) {
                        Some(known) => *known = article,
                        None => self.articles.push(article),
                    }
                }
            }
            Err(error) => {
                self.error = Some(error);
            }
        }
    }

    /// Placeholders of the current article whose name contains `filter`,
    /// ignoring case, sorted by name
    pub fn placeholders(&self, filter: &str) -> Vec<PlaceholderEntry> {
        let Some(article) = self.current_article() else {
            return Vec::new();
        };
        let filter = filter.to_lowercase();

        article
            .placeholders
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains(&filter))
            .map(|(name, value)| PlaceholderEntry {
                name: name.clone(),
                value: value.clone(),
                insert_text: format!("{{{{{}}}}}", name),
            })
            .collect()
    }
}
