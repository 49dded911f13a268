//! Assessments of the title, meta description and URL

use super::{scored, topic, Thresholds};
use crate::assessment::{Assessment, RuleCategory, RuleError};
use crate::document::Document;
use crate::messages::MessageFormatter;
use crate::research::keyphrase::words;
use crate::research::{Facts, Keyphrase};
use crate::result::AssessmentResult;

/// Keyphrase (or a synonym) in the meta description
#[derive(Debug, Clone, Copy)]
pub struct MetaDescriptionKeyword {
    max: usize,
}

impl MetaDescriptionKeyword {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            max: thresholds.meta_keyword_max,
        }
    }
}

impl Assessment for MetaDescriptionKeyword {
    fn id(&self) -> &str {
        "metaDescriptionKeyword"
    }

    fn name(&self) -> &str {
        "Keyphrase in meta description"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Metadata
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_keyword && facts.has_description)
    }

    fn get_result(
        &self,
        document: &Document,
        _facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let tokens = words(document.description());
        let count: usize = topic(document)
            .iter()
            .map(|k| k.positions_in(&tokens).len())
            .sum();
        let args = [("count", count.to_string()), ("max", self.max.to_string())];

        let (score, key) = match count {
            0 => (3, "missing"),
            n if n <= self.max => (9, "good"),
            _ => (3, "tooMany"),
        };
        Ok(scored(self.id(), score, messages, key, &args))
    }
}

/// Meta description length in characters
#[derive(Debug, Clone, Copy)]
pub struct MetaDescriptionLength {
    min: usize,
    max: usize,
}

impl MetaDescriptionLength {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            min: thresholds.meta_description_min,
            max: thresholds.meta_description_max,
        }
    }
}

impl Assessment for MetaDescriptionLength {
    fn id(&self) -> &str {
        "metaDescriptionLength"
    }

    fn name(&self) -> &str {
        "Meta description length"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Metadata
    }

    fn is_applicable(&self, _document: &Document, _facts: &Facts) -> Result<bool, RuleError> {
        Ok(true)
    }

    fn get_result(
        &self,
        _document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let length = facts.meta_description_length;
        let args = [("min", self.min.to_string()), ("max", self.max.to_string())];

        let (score, key) = match length {
            0 => (1, "missing"),
            n if n < self.min => (6, "short"),
            n if n > self.max => (6, "long"),
            _ => (9, "good"),
        };
        Ok(scored(self.id(), score, messages, key, &args))
    }
}

/// Keyphrase in the SEO title, preferably at the start
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleKeyword;

impl Assessment for TitleKeyword {
    fn id(&self) -> &str {
        "titleKeyword"
    }

    fn name(&self) -> &str {
        "Keyphrase in title"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Metadata
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_keyword && facts.has_title)
    }

    fn get_result(
        &self,
        document: &Document,
        _facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let keyphrase = Keyphrase::new(document.keyword());
        let positions = keyphrase.positions_in(&words(document.title()));

        let (score, key) = if positions.first() == Some(&0) {
            (9, "start")
        } else if !positions.is_empty() {
            (6, "notAtStart")
        } else if keyphrase.all_words_in(document.title()) {
            (6, "partial")
        } else {
            (2, "missing")
        };
        Ok(scored(
            self.id(),
            score,
            messages,
            key,
            &[("keyphrase", document.keyword().to_string())],
        ))
    }
}

/// Estimated pixel width of the SEO title
#[derive(Debug, Clone, Copy)]
pub struct TitleWidth {
    min: usize,
    max: usize,
}

impl TitleWidth {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            min: thresholds.title_min_width,
            max: thresholds.title_max_width,
        }
    }
}

impl Assessment for TitleWidth {
    fn id(&self) -> &str {
        "titleWidth"
    }

    fn name(&self) -> &str {
        "SEO title width"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Metadata
    }

    fn is_applicable(&self, _document: &Document, _facts: &Facts) -> Result<bool, RuleError> {
        Ok(true)
    }

    fn get_result(
        &self,
        _document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let (score, key) = if !facts.has_title {
            (1, "missing")
        } else if facts.title_width > self.max {
            (3, "long")
        } else if facts.title_width < self.min {
            (6, "short")
        } else {
            (9, "good")
        };
        Ok(scored(self.id(), score, messages, key, &[]))
    }
}

/// Keyphrase words in the URL path
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlKeyword;

/// Words of the URL path, or of the whole value when it is not absolute
fn slug_words(value: &str) -> Vec<String> {
    let path = match url::Url::parse(value) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => value.to_string(),
    };
    words(&path.replace(['-', '_', '/', '.', '+'], " "))
}

impl Assessment for UrlKeyword {
    fn id(&self) -> &str {
        "urlKeyword"
    }

    fn name(&self) -> &str {
        "Keyphrase in slug"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Metadata
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_keyword && facts.has_url && facts.has_text)
    }

    fn get_result(
        &self,
        document: &Document,
        _facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let slug = slug_words(document.url());
        let found = topic(document)
            .iter()
            .any(|k| k.words().iter().all(|w| slug.contains(w)));

        let (score, key) = if found { (9, "good") } else { (6, "missing") };
        Ok(scored(self.id(), score, messages, key, &[]))
    }
}
