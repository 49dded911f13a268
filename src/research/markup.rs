//! Shallow markup scanning
//!
//! Page text may contain simple inline and structural markup (paragraphs,
//! headings, links, images). This module enumerates those elements with
//! regular expressions. It never fails: anything it does not recognize is
//! treated as plain text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[a-zA-Z!][^>]*>").expect("valid tag regex"));

static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<h([1-6])(?:\s[^>]*)?>(.*?)</h[1-6]\s*>").expect("valid heading regex")
});

static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p\s*>").expect("valid paragraph regex")
});

static BLANK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid blank line regex"));

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<a(\s[^>]*)?>(.*?)</a\s*>").expect("valid link regex")
});

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<img\b([^>]*)>").expect("valid image regex"));

static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)([a-z][a-z0-9_:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid attribute regex")
});

static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("valid sentence regex"));

/// A heading element found in the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level (1-6)
    pub level: u8,
    /// Heading text with markup removed
    pub text: String,
    /// Byte offset of the opening tag
    pub offset: usize,
}

/// An anchor element found in the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    /// `href` attribute (empty when missing)
    pub href: String,
    /// Anchor text with markup removed
    pub text: String,
    /// Whether `rel` contains `nofollow`
    pub nofollow: bool,
}

/// An image element found in the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: String,
    /// `alt` attribute, if present
    pub alt: Option<String>,
}

/// Parse the attributes of an opening tag body
pub fn attributes(tag_body: &str) -> HashMap<String, String> {
    ATTR_RE
        .captures_iter(tag_body)
        .map(|caps| {
            let name = caps[1].to_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

/// Remove all tags, leaving a space where each tag was
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, " ").into_owned()
}

/// Collapse runs of whitespace into single spaces and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All headings in document order
pub fn headings(text: &str) -> Vec<Heading> {
    HEADING_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let level = caps[1].parse().ok()?;
            Some(Heading {
                level,
                text: normalize_whitespace(&strip_tags(&caps[2])),
                offset: whole.start(),
            })
        })
        .collect()
}

/// Paragraph texts with markup removed
///
/// Uses `<p>` elements when the text has any; otherwise falls back to
/// blank-line separated blocks. Headings always delimit blocks and are never
/// part of a paragraph.
pub fn paragraphs(text: &str) -> Vec<String> {
    let without_headings = HEADING_RE.replace_all(text, "\n\n");

    let blocks: Vec<String> = if PARAGRAPH_RE.is_match(&without_headings) {
        PARAGRAPH_RE
            .captures_iter(&without_headings)
            .map(|caps| caps[1].to_string())
            .collect()
    } else {
        BLANK_LINE_RE
            .split(&without_headings)
            .map(str::to_string)
            .collect()
    };

    blocks
        .iter()
        .map(|block| normalize_whitespace(&strip_tags(block)))
        .filter(|block| !block.is_empty())
        .collect()
}

/// Split plain text into sentences
pub fn sentences(text: &str) -> Vec<String> {
    SENTENCE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}

/// All anchors in document order
pub fn anchors(text: &str) -> Vec<Anchor> {
    LINK_RE
        .captures_iter(text)
        .map(|caps| {
            let attrs = caps.get(1).map(|m| attributes(m.as_str())).unwrap_or_default();
            let nofollow = attrs
                .get("rel")
                .map(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("nofollow")))
                .unwrap_or(false);
            Anchor {
                href: attrs.get("href").cloned().unwrap_or_default(),
                text: normalize_whitespace(&strip_tags(&caps[2])),
                nofollow,
            }
        })
        .collect()
}

/// All images in document order
pub fn images(text: &str) -> Vec<Image> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| {
            let mut attrs = attributes(&caps[1]);
            Image {
                src: attrs.remove("src").unwrap_or_default(),
                alt: attrs.remove("alt"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            normalize_whitespace(&strip_tags("<p>a <b>bold</b> move</p>")),
            "a bold move"
        );
        // A lone '<' is not a tag
        assert_eq!(normalize_whitespace(&strip_tags("1 < 2 and 3 > 2")), "1 < 2 and 3 > 2");
    }

    #[test]
    fn test_headings() {
        let found = headings("text <h2> subheading </h2> more <H3 class=\"x\">Other <em>one</em></H3>");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].level, 2);
        assert_eq!(found[0].text, "subheading");
        assert_eq!(found[0].offset, 5);
        assert_eq!(found[1].level, 3);
        assert_eq!(found[1].text, "Other one");
    }

    #[test]
    fn test_paragraphs_from_tags() {
        let found = paragraphs("<p>a paragraph</p><h1>heading</h1><p>second</p>");
        assert_eq!(found, vec!["a paragraph", "second"]);
    }

    #[test]
    fn test_paragraphs_from_blank_lines() {
        let found = paragraphs("first block\nstill first\n\n  \nsecond block");
        assert_eq!(found, vec!["first block still first", "second block"]);
    }

    #[test]
    fn test_headings_split_plain_paragraphs() {
        let found = paragraphs("text <h2> subheading </h2> more text");
        assert_eq!(found, vec!["text", "more text"]);
    }

    #[test]
    fn test_sentences() {
        let found = sentences("This is one. And two! Three? trailing");
        assert_eq!(found, vec!["This is one.", "And two!", "Three?", "trailing"]);
        assert!(sentences(" ... ").is_empty());
    }

    #[test]
    fn test_anchors() {
        let found = anchors(
            r#"See <a href="https://example.com" rel="noopener nofollow">this</a> and <a href='/about'>us</a>."#,
        );
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].href, "https://example.com");
        assert!(found[0].nofollow);
        assert_eq!(found[1].href, "/about");
        assert_eq!(found[1].text, "us");
        assert!(!found[1].nofollow);
    }

    #[test]
    fn test_images() {
        let found = images(r#"<img src="a.png" alt="A cat"><IMG src=b.png />"#);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].alt.as_deref(), Some("A cat"));
        assert_eq!(found[1].src, "b.png");
        assert_eq!(found[1].alt, None);
    }
}
