//! Assessments of text length, images and top-level headings

use super::{scored, topic, TextLengthBands, Thresholds};
use crate::assessment::{Assessment, RuleCategory, RuleError};
use crate::document::Document;
use crate::messages::MessageFormatter;
use crate::research::Facts;
use crate::result::AssessmentResult;

/// Images in the text and their alt attributes
#[derive(Debug, Clone, Copy, Default)]
pub struct TextImages;

impl Assessment for TextImages {
    fn id(&self) -> &str {
        "textImages"
    }

    fn name(&self) -> &str {
        "Images"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Structure
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_text)
    }

    fn get_result(
        &self,
        document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let alts: Vec<&str> = facts
            .images
            .iter()
            .filter_map(|image| image.alt.as_deref())
            .filter(|alt| !alt.trim().is_empty())
            .collect();
        let topic = topic(document);

        let (score, key) = if facts.images.is_empty() {
            (3, "none")
        } else if alts.is_empty() {
            (6, "noAlt")
        } else if topic.is_empty()
            || alts
                .iter()
                .any(|alt| topic.iter().any(|k| k.all_words_in(alt)))
        {
            (9, "good")
        } else {
            (6, "noTopicAlt")
        };
        Ok(scored(self.id(), score, messages, key, &[]))
    }
}

/// Number of words in the text
#[derive(Debug, Clone, Copy)]
pub struct TextLength {
    bands: TextLengthBands,
}

impl TextLength {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            bands: thresholds.text_length,
        }
    }
}

impl Assessment for TextLength {
    fn id(&self) -> &str {
        "textLength"
    }

    fn name(&self) -> &str {
        "Text length"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Structure
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
        let count = facts.word_count;
        let bands = &self.bands;
        let args = [
            ("count", count.to_string()),
            ("min", bands.good.to_string()),
        ];

        let (score, key) = match count {
            n if n >= bands.good => (9, "good"),
            n if n >= bands.ok => (6, "ok"),
            n if n >= bands.bad => (3, "bad"),
            n if n >= bands.very_bad => (2, "veryBad"),
            _ => (1, "veryBad"),
        };
        Ok(scored(self.id(), score, messages, key, &args))
    }
}

/// Top-level headings inside the body
///
/// A single H1 that opens the text is treated as the page title and gives
/// an unscored result; any other H1 is flagged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleH1;

impl Assessment for SingleH1 {
    fn id(&self) -> &str {
        "singleH1Assessment"
    }

    fn name(&self) -> &str {
        "Single title"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Structure
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_h1_in_body())
    }

    fn get_result(
        &self,
        document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let h1s: Vec<_> = facts.h1s().collect();
        let opens_text = |offset: usize| {
            document
                .text()
                .get(..offset)
                .is_some_and(|before| before.trim().is_empty())
        };

        if let [only] = h1s.as_slice() {
            if opens_text(only.offset) {
                return Ok(AssessmentResult::unscored(self.id()));
            }
        }
        Ok(scored(self.id(), 1, messages, "bad", &[]))
    }
}
