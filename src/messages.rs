//! Feedback text formatting
//!
//! Assessments never build user-facing strings directly. They ask a
//! [`MessageFormatter`] for a message key plus named arguments, which keeps
//! localization out of the assessment bodies and out of global state.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex"));

/// Error loading a message catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

/// Produces feedback text for a message key
pub trait MessageFormatter: Send + Sync {
    /// Locale of the produced text
    fn locale(&self) -> &str;

    /// Template for a key, if this formatter knows it
    fn template(&self, key: &str) -> Option<&str>;

    /// Whether text in this formatter's language suits a page locale
    ///
    /// Only the language part is compared, so `en` matches `en_US`.
    fn speaks(&self, locale: &str) -> bool {
        language(self.locale()).eq_ignore_ascii_case(language(locale))
    }

    /// Render a key with named arguments
    ///
    /// Unknown keys render as the key itself so a missing translation is
    /// visible instead of silently empty.
    fn format(&self, key: &str, args: &[(&str, String)]) -> String {
        match self.template(key) {
            Some(template) => interpolate(template, args),
            None => key.to_string(),
        }
    }
}

/// Language part of a locale (`nl` for `nl_NL` or `nl-BE`)
fn language(locale: &str) -> &str {
    locale.split(|c: char| c == '_' || c == '-').next().unwrap_or(locale)
}

/// Replace `{name}` placeholders; unknown placeholders are left as-is
pub fn interpolate(template: &str, args: &[(&str, String)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures| {
            let name = &caps[1];
            args.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

static ENGLISH: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // keyphraseLength
        ("keyphraseLength.missing", "Keyphrase length: No focus keyphrase was set for this page. Set a keyphrase in order to calculate your SEO score."),
        ("keyphraseLength.good", "Keyphrase length: Good job!"),
        ("keyphraseLength.long", "Keyphrase length: The keyphrase contains {count} words. That's more than the recommended maximum of {max} words. Make it shorter!"),
        ("keyphraseLength.tooLong", "Keyphrase length: The keyphrase contains {count} words. That's way more than the recommended maximum of {max} words. Make it shorter!"),
        // metaDescriptionLength
        ("metaDescriptionLength.missing", "Meta description length: No meta description has been specified. Search engines will display copy from the page instead. Make sure to write one!"),
        ("metaDescriptionLength.short", "Meta description length: The meta description is too short (under {min} characters). Up to {max} characters are available. Use the space!"),
        ("metaDescriptionLength.long", "Meta description length: The meta description is over {max} characters. To ensure the entire description will be visible, you should reduce the length!"),
        ("metaDescriptionLength.good", "Meta description length: Well done!"),
        // textLength
        ("textLength.good", "Text length: The text contains {count} words. Good job!"),
        ("textLength.ok", "Text length: The text contains {count} words. This is slightly below the recommended minimum of {min} words. Add a bit more copy."),
        ("textLength.bad", "Text length: The text contains {count} words. This is below the recommended minimum of {min} words. Add more content."),
        ("textLength.veryBad", "Text length: The text contains {count} words. This is far below the recommended minimum of {min} words. Add more content."),
        // titleWidth
        ("titleWidth.missing", "SEO title width: Please create an SEO title."),
        ("titleWidth.short", "SEO title width: The SEO title is too short. Use the space to add keyphrase variations or create compelling call-to-action copy."),
        ("titleWidth.long", "SEO title width: The SEO title is wider than the viewable limit. Try to make it shorter."),
        ("titleWidth.good", "SEO title width: Good job!"),
        // titleKeyword
        ("titleKeyword.start", "Keyphrase in title: The exact match of the focus keyphrase appears at the beginning of the SEO title. Good job!"),
        ("titleKeyword.notAtStart", "Keyphrase in title: The exact match of the focus keyphrase appears in the SEO title, but not at the beginning. Move it to the beginning for the best results."),
        ("titleKeyword.partial", "Keyphrase in title: Does not contain the exact match. Try to write the exact match of your keyphrase in the SEO title and put it at the beginning of the title."),
        ("titleKeyword.missing", "Keyphrase in title: Not all the words from your keyphrase \"{keyphrase}\" appear in the SEO title. Try to use the exact match of your keyphrase in the SEO title and put it at the beginning of the title."),
        // introductionKeyword
        ("introductionKeyword.good", "Keyphrase in introduction: Well done!"),
        ("introductionKeyword.spread", "Keyphrase in introduction: Your keyphrase or its synonyms appear in the first paragraph of the copy, but not within one sentence. Fix that!"),
        ("introductionKeyword.missing", "Keyphrase in introduction: Your keyphrase or its synonyms do not appear in the first paragraph. Make sure the topic is clear immediately."),
        // subheadingsKeyword
        ("subheadingsKeyword.good", "Keyphrase in subheading: {count} of your {total} higher-level subheadings reflect the topic of your copy. Good job!"),
        ("subheadingsKeyword.tooFew", "Keyphrase in subheading: Use more keyphrases or synonyms in your higher-level subheadings!"),
        ("subheadingsKeyword.tooMany", "Keyphrase in subheading: More than {max}% of your higher-level subheadings reflect the topic of your copy. That's too much. Don't over-optimize!"),
        // textImages
        ("textImages.none", "Images: No images appear on this page. Add some!"),
        ("textImages.noAlt", "Images: Images on this page do not have alt attributes. Add alt attributes to your images!"),
        ("textImages.noTopicAlt", "Images: Images on this page do not have alt attributes that reflect the topic of your text. Add your keyphrase or synonyms to the alt tags of relevant images!"),
        ("textImages.good", "Images: Good job!"),
        // externalLinks
        ("externalLinks.none", "Outbound links: No outbound links appear in this page. Add some!"),
        ("externalLinks.nofollow", "Outbound links: All outbound links on this page are nofollowed. Add some normal links."),
        ("externalLinks.mixed", "Outbound links: There are both nofollowed and normal outbound links on this page. Good job!"),
        ("externalLinks.good", "Outbound links: Good job!"),
        // internalLinks
        ("internalLinks.none", "Internal links: No internal links appear in this page, make sure to add some!"),
        ("internalLinks.nofollow", "Internal links: The internal links in this page are all nofollowed. Add some good internal links."),
        ("internalLinks.good", "Internal links: You have enough internal links. Good job!"),
        // urlKeyword
        ("urlKeyword.good", "Keyphrase in slug: Great work!"),
        ("urlKeyword.missing", "Keyphrase in slug: (Part of) your keyphrase does not appear in the slug. Change that!"),
        // metaDescriptionKeyword
        ("metaDescriptionKeyword.good", "Keyphrase in meta description: Keyphrase or synonym appear in the meta description. Well done!"),
        ("metaDescriptionKeyword.missing", "Keyphrase in meta description: The meta description has been specified, but it does not contain the keyphrase. Fix that!"),
        ("metaDescriptionKeyword.tooMany", "Keyphrase in meta description: The meta description contains the keyphrase {count} times, which is over the advised maximum of {max} times. Limit that!"),
        // keywordDensity
        ("keywordDensity.good", "Keyphrase density: The focus keyphrase was found {count} times. This is great!"),
        ("keywordDensity.low", "Keyphrase density: The focus keyphrase was found {count} times. That's less than the recommended minimum of {min} times for a text of this length. Focus on your keyphrase!"),
        ("keywordDensity.high", "Keyphrase density: The focus keyphrase was found {count} times. That's more than the recommended maximum of {max} times for a text of this length. Don't overoptimize!"),
        ("keywordDensity.overOptimized", "Keyphrase density: The focus keyphrase was found {count} times. That's way more than the recommended maximum of {max} times for a text of this length. Don't overoptimize!"),
        // singleH1Assessment
        ("singleH1Assessment.bad", "Single title: H1s should only be used as your main title. Find all H1s in your text that aren't your main title and change them to a lower heading level!"),
        // largestKeywordDistance
        ("largestKeywordDistance.good", "Keyphrase distribution: Good job!"),
        ("largestKeywordDistance.ok", "Keyphrase distribution: Some parts of your text do not contain the keyphrase or its synonyms. Distribute them more evenly."),
        ("largestKeywordDistance.bad", "Keyphrase distribution: Large parts of your text do not contain the keyphrase or its synonyms. Distribute them more evenly."),
    ])
});

/// Built-in English messages
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl MessageFormatter for DefaultMessages {
    fn locale(&self) -> &str {
        crate::document::DEFAULT_LOCALE
    }

    fn template(&self, key: &str) -> Option<&str> {
        ENGLISH.get(key).copied()
    }
}

/// Every key the built-in assessments use
pub fn default_keys() -> Vec<&'static str> {
    let mut keys: Vec<_> = ENGLISH.keys().copied().collect();
    keys.sort_unstable();
    keys
}

/// A translation table for one locale
///
/// Keys missing from the table fall back to the built-in English text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub locale: String,

    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl Catalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: HashMap::new(),
        }
    }

    pub fn with_message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    /// Load a catalog from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let catalog: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(CatalogError::Invalid(format!(
                    "Unknown catalog file format: {}",
                    ext
                )))
            }
        };

        if catalog.locale.trim().is_empty() {
            return Err(CatalogError::Invalid(format!(
                "{}: missing locale",
                path.display()
            )));
        }

        log::debug!(
            "loaded {} messages for locale {} from {}",
            catalog.messages.len(),
            catalog.locale,
            path.display()
        );
        Ok(catalog)
    }

    /// Keys known to the built-in messages but absent from this catalog
    pub fn missing_keys(&self) -> Vec<&'static str> {
        default_keys()
            .into_iter()
            .filter(|k| !self.messages.contains_key(*k))
            .collect()
    }
}

impl MessageFormatter for Catalog {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn template(&self, key: &str) -> Option<&str> {
        self.messages
            .get(key)
            .map(String::as_str)
            .or_else(|| DefaultMessages.template(key))
    }
}
