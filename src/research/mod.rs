//! Fact extraction ("research") over a document
//!
//! Facts are computed once per assessment run, before any assessment
//! executes, and shared read-only by every assessment. Extraction is total
//! and pure: the same document always yields the same facts.

pub mod keyphrase;
pub mod markup;

pub use keyphrase::Keyphrase;
pub use markup::{Anchor, Heading, Image};

use crate::document::Document;
use log::debug;
use serde::Serialize;
use std::fmt;

/// Where a link points relative to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Same site (relative path or same host as the page URL)
    Internal,
    /// Another site
    External,
    /// Fragments, mail, telephone and other non-web targets
    Other,
}

/// An anchor together with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    #[serde(flatten)]
    pub anchor: Anchor,
    pub kind: LinkKind,
}

/// A single named fact value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactValue {
    Flag(bool),
    Count(usize),
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Flag(b) => write!(f, "{}", b),
            FactValue::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Derived, read-only measurements of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facts {
    pub has_text: bool,
    pub has_keyword: bool,
    pub has_synonyms: bool,
    pub has_title: bool,
    pub has_url: bool,
    pub has_description: bool,

    /// Words in the text with markup removed
    pub word_count: usize,

    /// Word indices where the keyphrase starts
    pub keyphrase_positions: Vec<usize>,

    /// Word indices where any synonym starts, ascending
    pub synonym_positions: Vec<usize>,

    /// First paragraph of the text, markup removed
    pub introduction: String,

    pub paragraph_count: usize,

    /// All headings in the body, in order
    pub headings: Vec<Heading>,

    pub images: Vec<Image>,

    pub links: Vec<Link>,

    /// Meta description length in characters
    pub meta_description_length: usize,

    /// Title length in characters
    pub title_length: usize,

    /// Estimated rendered title width in pixels
    pub title_width: usize,
}

impl Facts {
    /// Names accepted by [`Facts::get`], in display order
    pub const NAMES: &'static [&'static str] = &[
        "hasText",
        "hasKeyword",
        "hasSynonyms",
        "hasTitle",
        "hasUrl",
        "hasDescription",
        "wordCount",
        "keyphraseOccurrenceCount",
        "topicOccurrenceCount",
        "paragraphCount",
        "hasSubheading",
        "subheadingCount",
        "hasImage",
        "imageCount",
        "hasExternalLink",
        "hasInternalLink",
        "hasH1InBody",
        "h1Count",
        "metaDescriptionLength",
        "titleLength",
        "titleWidth",
    ];

    /// Extract every fact from a document
    pub fn extract(document: &Document) -> Self {
        let text = document.text();
        let plain = markup::strip_tags(text);
        let tokens = keyphrase::words(&plain);

        let keyphrase_positions = Keyphrase::new(document.keyword()).positions_in(&tokens);
        let mut synonym_positions: Vec<usize> = document
            .synonym_list()
            .into_iter()
            .map(Keyphrase::new)
            .filter(|k| !k.is_empty())
            .flat_map(|k| k.positions_in(&tokens))
            .collect();
        synonym_positions.sort_unstable();
        synonym_positions.dedup();

        let paragraphs = markup::paragraphs(text);
        let site_host = site_host(document.url());
        let links = markup::anchors(text)
            .into_iter()
            .map(|anchor| {
                let kind = classify_link(&anchor.href, site_host.as_deref());
                Link { anchor, kind }
            })
            .collect();

        let facts = Self {
            has_text: document.has_text(),
            has_keyword: document.has_keyword(),
            has_synonyms: document.has_synonyms(),
            has_title: document.has_title(),
            has_url: document.has_url(),
            has_description: document.has_description(),
            word_count: tokens.len(),
            keyphrase_positions,
            synonym_positions,
            introduction: paragraphs.first().cloned().unwrap_or_default(),
            paragraph_count: paragraphs.len(),
            headings: markup::headings(text),
            images: markup::images(text),
            links,
            meta_description_length: document.description().chars().count(),
            title_length: document.title().chars().count(),
            title_width: title_width(document.title()),
        };

        debug!(
            "extracted facts: {} words, {} keyphrase + {} synonym occurrences, {} headings, {} links, {} images",
            facts.word_count,
            facts.keyphrase_positions.len(),
            facts.synonym_positions.len(),
            facts.headings.len(),
            facts.links.len(),
            facts.images.len()
        );

        facts
    }

    pub fn keyphrase_occurrence_count(&self) -> usize {
        self.keyphrase_positions.len()
    }

    /// Keyphrase plus synonym occurrences
    pub fn topic_occurrence_count(&self) -> usize {
        self.keyphrase_positions.len() + self.synonym_positions.len()
    }

    /// Keyphrase and synonym positions merged, ascending
    pub fn topic_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .keyphrase_positions
            .iter()
            .chain(&self.synonym_positions)
            .copied()
            .collect();
        positions.sort_unstable();
        positions
    }

    /// Headings below the top level (h2-h6)
    pub fn subheadings(&self) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(|h| h.level >= 2)
    }

    /// Top-level headings inside the body
    pub fn h1s(&self) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(|h| h.level == 1)
    }

    pub fn has_subheading(&self) -> bool {
        self.subheadings().next().is_some()
    }

    pub fn has_image(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn has_external_link(&self) -> bool {
        self.links_of(LinkKind::External).next().is_some()
    }

    pub fn has_internal_link(&self) -> bool {
        self.links_of(LinkKind::Internal).next().is_some()
    }

    pub fn has_h1_in_body(&self) -> bool {
        self.h1s().next().is_some()
    }

    pub fn links_of(&self, kind: LinkKind) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.kind == kind)
    }

    /// Look a fact up by name
    pub fn get(&self, name: &str) -> Option<FactValue> {
        use FactValue::{Count, Flag};

        let value = match name {
            "hasText" => Flag(self.has_text),
            "hasKeyword" => Flag(self.has_keyword),
            "hasSynonyms" => Flag(self.has_synonyms),
            "hasTitle" => Flag(self.has_title),
            "hasUrl" => Flag(self.has_url),
            "hasDescription" => Flag(self.has_description),
            "wordCount" => Count(self.word_count),
            "keyphraseOccurrenceCount" => Count(self.keyphrase_occurrence_count()),
            "topicOccurrenceCount" => Count(self.topic_occurrence_count()),
            "paragraphCount" => Count(self.paragraph_count),
            "hasSubheading" => Flag(self.has_subheading()),
            "subheadingCount" => Count(self.subheadings().count()),
            "hasImage" => Flag(self.has_image()),
            "imageCount" => Count(self.images.len()),
            "hasExternalLink" => Flag(self.has_external_link()),
            "hasInternalLink" => Flag(self.has_internal_link()),
            "hasH1InBody" => Flag(self.has_h1_in_body()),
            "h1Count" => Count(self.h1s().count()),
            "metaDescriptionLength" => Count(self.meta_description_length),
            "titleLength" => Count(self.title_length),
            "titleWidth" => Count(self.title_width),
            _ => return None,
        };
        Some(value)
    }

    /// Every named fact, in [`Facts::NAMES`] order
    pub fn named(&self) -> Vec<(&'static str, FactValue)> {
        Self::NAMES
            .iter()
            .filter_map(|name| self.get(name).map(|v| (*name, v)))
            .collect()
    }
}

/// Convenience wrapper around [`Facts::extract`]
pub fn extract_facts(document: &Document) -> Facts {
    Facts::extract(document)
}

/// Host of the page URL without a leading `www.`
fn site_host(page_url: &str) -> Option<String> {
    let parsed = url::Url::parse(page_url).ok()?;
    parsed.host_str().map(|h| h.trim_start_matches("www.").to_lowercase())
}

fn classify_link(href: &str, site_host: Option<&str>) -> LinkKind {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return LinkKind::Other;
    }

    match url::Url::parse(href) {
        Ok(target) => {
            if target.scheme() != "http" && target.scheme() != "https" {
                return LinkKind::Other;
            }
            let host = target
                .host_str()
                .map(|h| h.trim_start_matches("www.").to_lowercase());
            match (host, site_host) {
                (Some(host), Some(site)) if host == site => LinkKind::Internal,
                _ => LinkKind::External,
            }
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            if href.starts_with("//") {
                LinkKind::External
            } else {
                LinkKind::Internal
            }
        }
        Err(_) => LinkKind::Other,
    }
}

/// Rough rendered width of a title in a search result snippet, in pixels
pub fn title_width(title: &str) -> usize {
    title
        .chars()
        .map(|c| match c {
            ' ' | 'i' | 'l' | 'j' | '.' | ',' | '\'' | '!' | '|' | ':' | ';' => 5,
            'f' | 't' | 'r' | '(' | ')' | '-' | 'I' => 6,
            'm' | 'w' => 15,
            'M' | 'W' => 17,
            c if c.is_ascii_uppercase() => 12,
            _ => 10,
        })
        .sum()
}
