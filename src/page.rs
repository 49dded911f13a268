//! Page files: body text with optional YAML front matter
//!
//! ```text
//! ---
//! keyword: red shoes
//! title: Red shoes for every season
//! url: https://shop.example/red-shoes
//! ---
//! <p>Body text...</p>
//! ```

use crate::document::{Document, DocumentError, DocumentOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

const FENCE: &str = "---";

/// Error loading a page
#[derive(Debug, Error)]
pub enum PageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Front matter error in {source_name}: {error}")]
    FrontMatter {
        source_name: String,
        error: serde_yaml::Error,
    },

    #[error("Unterminated front matter in {0}")]
    Unterminated(String),

    #[error("Invalid page metadata in {source_name}: {error}")]
    Document {
        source_name: String,
        error: DocumentError,
    },
}

/// A page as read from a file or stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// File path, or `<stdin>`
    pub source: PathBuf,
    /// Metadata from the front matter
    pub options: DocumentOptions,
    /// Text after the front matter
    pub body: String,
}

impl Page {
    /// Split front matter from body text
    pub fn parse(source: impl Into<PathBuf>, content: &str) -> Result<Self, PageError> {
        let source = source.into();
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(rest) = strip_fence_line(content) else {
            return Ok(Self {
                source,
                options: DocumentOptions::default(),
                body: content.to_string(),
            });
        };

        // Find the closing fence on a line of its own
        let mut offset = 0;
        let mut closing = None;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == FENCE {
                closing = Some((offset, offset + line.len()));
                break;
            }
            offset += line.len();
        }
        let (yaml_end, body_start) =
            closing.ok_or_else(|| PageError::Unterminated(source.display().to_string()))?;

        let yaml = &rest[..yaml_end];
        let options = if yaml.trim().is_empty() {
            DocumentOptions::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|error| PageError::FrontMatter {
                source_name: source.display().to_string(),
                error,
            })?
        };

        Ok(Self {
            source,
            options,
            body: rest[body_start..].to_string(),
        })
    }

    /// Read and parse a page file
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Build the document, layering `overrides` on top of the front matter
    ///
    /// `default_locale` is used when neither provides a locale.
    pub fn document(
        &self,
        overrides: &DocumentOptions,
        default_locale: Option<&str>,
    ) -> Result<Document, PageError> {
        let mut options = DocumentOptions::default();
        if let Some(locale) = default_locale {
            options.locale = locale.to_string();
        }
        options.merge(self.options.clone());
        options.merge(overrides.clone());

        Document::with_options(self.body.clone(), options).map_err(|error| PageError::Document {
            source_name: self.source.display().to_string(),
            error,
        })
    }
}

/// Content after an opening `---` line, if the content starts with one
fn strip_fence_line(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(FENCE)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}
