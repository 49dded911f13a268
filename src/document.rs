//! The document under assessment: body text plus page metadata

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Locale used when the caller does not provide one
pub const DEFAULT_LOCALE: &str = "en_US";

static LOCALE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(?:[_-][A-Z]{2})?$").expect("valid locale regex"));

/// Error constructing a document
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Invalid locale '{0}' (expected e.g. 'en' or 'en_US')")]
    InvalidLocale(String),

    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, String),
}

/// Metadata recognized when building a [`Document`]
///
/// Every field defaults to empty; an empty value means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Primary keyphrase
    pub keyword: String,

    /// Comma-separated alternate phrasings of the keyphrase
    pub synonyms: String,

    /// SEO title
    pub title: String,

    /// Meta description
    pub description: String,

    /// Page URL or slug
    pub url: String,

    /// Locale (empty = [`DEFAULT_LOCALE`])
    pub locale: String,
}

impl DocumentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_synonyms(mut self, synonyms: impl Into<String>) -> Self {
        self.synonyms = synonyms.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Overlay non-empty fields of `other` on top of this one
    pub fn merge(&mut self, other: DocumentOptions) {
        let fields = [
            (&mut self.keyword, other.keyword),
            (&mut self.synonyms, other.synonyms),
            (&mut self.title, other.title),
            (&mut self.description, other.description),
            (&mut self.url, other.url),
            (&mut self.locale, other.locale),
        ];
        for (target, value) in fields {
            if !value.trim().is_empty() {
                *target = value;
            }
        }
    }
}

/// Immutable text-plus-metadata value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    text: String,
    keyword: String,
    synonyms: String,
    title: String,
    description: String,
    url: String,
    locale: String,
}

impl Document {
    /// Create a document with text only
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyword: String::new(),
            synonyms: String::new(),
            title: String::new(),
            description: String::new(),
            url: String::new(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Create a document with metadata, validating it once
    pub fn with_options(
        text: impl Into<String>,
        options: DocumentOptions,
    ) -> Result<Self, DocumentError> {
        let locale = options.locale.trim();
        let locale = if locale.is_empty() {
            DEFAULT_LOCALE.to_string()
        } else if LOCALE_RE.is_match(locale) {
            locale.replace('-', "_")
        } else {
            return Err(DocumentError::InvalidLocale(locale.to_string()));
        };

        let url = options.url.trim().to_string();
        validate_url(&url)?;

        Ok(Self {
            text: text.into(),
            keyword: options.keyword.trim().to_string(),
            synonyms: options.synonyms.trim().to_string(),
            title: options.title.trim().to_string(),
            description: options.description.trim().to_string(),
            url,
            locale,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Raw synonyms string as provided
    pub fn synonyms(&self) -> &str {
        &self.synonyms
    }

    /// Individual synonyms, trimmed, empty entries dropped
    pub fn synonym_list(&self) -> Vec<&str> {
        self.synonyms
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn has_keyword(&self) -> bool {
        !self.keyword.is_empty()
    }

    pub fn has_synonyms(&self) -> bool {
        !self.synonym_list().is_empty()
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Accept absolute URLs, root-relative paths and bare slugs; reject whitespace
fn validate_url(value: &str) -> Result<(), DocumentError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(DocumentError::InvalidUrl(
            value.to_string(),
            "contains whitespace".to_string(),
        ));
    }
    if value.contains("://") {
        url::Url::parse(value)
            .map_err(|e| DocumentError::InvalidUrl(value.to_string(), e.to_string()))?;
    }
    Ok(())
}
