//! Built-in page assessments
//!
//! Each assessment pairs an applicability predicate over [`Facts`] with a
//! small scorer. Scores use 9 for good, 6 for acceptable, 3 for bad and 1
//! for a problem that blocks the page from ranking well.

mod content;
mod keyphrase;
mod links;
mod metadata;

pub use content::{SingleH1, TextImages, TextLength};
pub use keyphrase::{
    IntroductionKeyword, KeyphraseLength, KeywordDensity, LargestKeywordDistance,
    SubheadingsKeyword,
};
pub use links::{ExternalLinks, InternalLinks};
pub use metadata::{MetaDescriptionKeyword, MetaDescriptionLength, TitleKeyword, TitleWidth, UrlKeyword};

use crate::assessment::Assessment;
use crate::document::Document;
use crate::messages::MessageFormatter;
use crate::research::Keyphrase;
use crate::result::AssessmentResult;
use std::sync::Arc;

/// Word-count bands for text length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLengthBands {
    pub good: usize,
    pub ok: usize,
    pub bad: usize,
    pub very_bad: usize,
}

/// Tunable limits shared by the built-in assessments
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Recommended maximum number of keyphrase words
    pub keyphrase_max_words: usize,
    pub meta_description_min: usize,
    pub meta_description_max: usize,
    pub text_length: TextLengthBands,
    /// Title width range in pixels
    pub title_min_width: usize,
    pub title_max_width: usize,
    /// Share of subheadings mentioning the topic, in percent
    pub subheading_min_share: usize,
    pub subheading_max_share: usize,
    /// Keyphrase density range, in percent of words
    pub density_min: f64,
    pub density_max: f64,
    /// Density above which the text counts as over-optimized
    pub density_over: f64,
    /// Maximum keyphrase occurrences in the meta description
    pub meta_keyword_max: usize,
    /// Largest gap between topic mentions, in percent of words
    pub distance_good: f64,
    pub distance_ok: f64,
    /// Score when a page has no outbound links
    pub no_external_links_score: u8,
}

impl Thresholds {
    pub fn seo() -> Self {
        Self {
            keyphrase_max_words: 4,
            meta_description_min: 120,
            meta_description_max: 156,
            text_length: TextLengthBands {
                good: 300,
                ok: 250,
                bad: 200,
                very_bad: 100,
            },
            title_min_width: 400,
            title_max_width: 600,
            subheading_min_share: 30,
            subheading_max_share: 75,
            density_min: 0.5,
            density_max: 2.5,
            density_over: 3.5,
            meta_keyword_max: 2,
            distance_good: 35.0,
            distance_ok: 50.0,
            no_external_links_score: 6,
        }
    }

    pub fn cornerstone() -> Self {
        Self {
            text_length: TextLengthBands {
                good: 900,
                ok: 400,
                bad: 300,
                very_bad: 100,
            },
            density_max: 3.0,
            density_over: 4.0,
            no_external_links_score: 3,
            ..Self::seo()
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::seo()
    }
}

/// The fifteen built-in assessments in registry order
pub fn standard(thresholds: &Thresholds) -> Vec<Arc<dyn Assessment>> {
    vec![
        Arc::new(IntroductionKeyword),
        Arc::new(KeyphraseLength::new(thresholds)),
        Arc::new(KeywordDensity::new(thresholds)),
        Arc::new(MetaDescriptionKeyword::new(thresholds)),
        Arc::new(MetaDescriptionLength::new(thresholds)),
        Arc::new(SubheadingsKeyword::new(thresholds)),
        Arc::new(TextImages),
        Arc::new(TextLength::new(thresholds)),
        Arc::new(ExternalLinks::new(thresholds)),
        Arc::new(InternalLinks),
        Arc::new(TitleKeyword),
        Arc::new(TitleWidth::new(thresholds)),
        Arc::new(UrlKeyword),
        Arc::new(LargestKeywordDistance::new(thresholds)),
        Arc::new(SingleH1),
    ]
}

/// Build a scored result whose text is the message `<id>.<key>`
fn scored(
    id: &str,
    score: u8,
    messages: &dyn MessageFormatter,
    key: &str,
    args: &[(&str, String)],
) -> AssessmentResult {
    AssessmentResult::new(id, score, messages.format(&format!("{}.{}", id, key), args))
}

/// Keyphrase followed by every synonym
fn topic(document: &Document) -> Vec<Keyphrase> {
    Keyphrase::topic(document.keyword(), &document.synonym_list())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_ids_are_unique() {
        let rules = standard(&Thresholds::seo());
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), 15);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn test_cornerstone_is_stricter() {
        let seo = Thresholds::seo();
        let cornerstone = Thresholds::cornerstone();
        assert!(cornerstone.text_length.good > seo.text_length.good);
        assert!(cornerstone.no_external_links_score < seo.no_external_links_score);
        assert_eq!(cornerstone.meta_description_max, seo.meta_description_max);
    }
}
