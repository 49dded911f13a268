//! Assessments about the focus keyphrase in the body text

use super::{scored, topic, Thresholds};
use crate::assessment::{Assessment, RuleCategory, RuleError};
use crate::document::Document;
use crate::messages::MessageFormatter;
use crate::research::markup;
use crate::research::{Facts, Keyphrase};
use crate::result::AssessmentResult;

/// Keyphrase (or a synonym) in the first paragraph
#[derive(Debug, Clone, Copy, Default)]
pub struct IntroductionKeyword;

impl Assessment for IntroductionKeyword {
    fn id(&self) -> &str {
        "introductionKeyword"
    }

    fn name(&self) -> &str {
        "Keyphrase in introduction"
    }

    fn description(&self) -> &str {
        "Checks that the keyphrase or a synonym appears in the first paragraph"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Keyphrase
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_keyword && facts.has_text)
    }

    fn get_result(
        &self,
        document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let topic = topic(document);
        let intro = &facts.introduction;

        let in_one_sentence = markup::sentences(intro)
            .iter()
            .any(|sentence| topic.iter().any(|k| k.all_words_in(sentence)));

        let (score, key) = if in_one_sentence {
            (9, "good")
        } else if topic.iter().any(|k| k.all_words_in(intro)) {
            (6, "spread")
        } else {
            (3, "missing")
        };
        Ok(scored(self.id(), score, messages, key, &[]))
    }
}

/// Number of words in the keyphrase
#[derive(Debug, Clone, Copy)]
pub struct KeyphraseLength {
    max_words: usize,
}

impl KeyphraseLength {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            max_words: thresholds.keyphrase_max_words,
        }
    }
}

impl Assessment for KeyphraseLength {
    fn id(&self) -> &str {
        "keyphraseLength"
    }

    fn name(&self) -> &str {
        "Keyphrase length"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Keyphrase
    }

    fn is_applicable(&self, _document: &Document, _facts: &Facts) -> Result<bool, RuleError> {
        Ok(true)
    }

    fn get_result(
        &self,
        document: &Document,
        _facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let count = Keyphrase::new(document.keyword()).word_count();
        let args = [
            ("count", count.to_string()),
            ("max", self.max_words.to_string()),
        ];

        let (score, key) = match count {
            0 => (1, "missing"),
            n if n <= self.max_words => (9, "good"),
            n if n <= self.max_words * 2 => (6, "long"),
            _ => (3, "tooLong"),
        };
        Ok(scored(self.id(), score, messages, key, &args))
    }
}

/// Keyphrase occurrences relative to text length
#[derive(Debug, Clone, Copy)]
pub struct KeywordDensity {
    min: f64,
    max: f64,
    over: f64,
}

impl KeywordDensity {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            min: thresholds.density_min,
            max: thresholds.density_max,
            over: thresholds.density_over,
        }
    }

    /// Recommended (min, max) occurrence counts for a text of `word_count` words
    pub fn recommended_range(&self, word_count: usize) -> (usize, usize) {
        let words = word_count as f64;
        let min = ((words * self.min / 100.0).ceil() as usize).max(1);
        let max = ((words * self.max / 100.0).floor() as usize).max(min);
        (min, max)
    }
}

impl Assessment for KeywordDensity {
    fn id(&self) -> &str {
        "keywordDensity"
    }

    fn name(&self) -> &str {
        "Keyphrase density"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Keyphrase
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_keyword && facts.word_count >= 100)
    }

    fn get_result(
        &self,
        _document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        if facts.word_count == 0 {
            return Ok(AssessmentResult::unscored(self.id()));
        }

        let count = facts.keyphrase_occurrence_count();
        let (min, max) = self.recommended_range(facts.word_count);
        let density = count as f64 * 100.0 / facts.word_count as f64;
        let args = [
            ("count", count.to_string()),
            ("min", min.to_string()),
            ("max", max.to_string()),
        ];

        let (score, key) = if count < min {
            (4, "low")
        } else if count <= max {
            (9, "good")
        } else if density > self.over {
            (1, "overOptimized")
        } else {
            (4, "high")
        };
        Ok(scored(self.id(), score, messages, key, &args))
    }
}

/// Share of higher-level subheadings that mention the topic
#[derive(Debug, Clone, Copy)]
pub struct SubheadingsKeyword {
    min_share: usize,
    max_share: usize,
}

impl SubheadingsKeyword {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            min_share: thresholds.subheading_min_share,
            max_share: thresholds.subheading_max_share,
        }
    }
}

impl Assessment for SubheadingsKeyword {
    fn id(&self) -> &str {
        "subheadingsKeyword"
    }

    fn name(&self) -> &str {
        "Keyphrase in subheading"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Keyphrase
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_keyword && facts.has_subheading())
    }

    fn get_result(
        &self,
        document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let topic = topic(document);
        let higher: Vec<_> = facts.subheadings().filter(|h| h.level <= 3).collect();
        let total = higher.len();
        let count = higher
            .iter()
            .filter(|h| topic.iter().any(|k| k.all_words_in(&h.text)))
            .count();
        let share = if total == 0 { 0 } else { count * 100 / total };
        let args = [
            ("count", count.to_string()),
            ("total", total.to_string()),
            ("max", self.max_share.to_string()),
        ];

        // A single subheading that mentions the topic is fine
        let (score, key) = if count == 0 || share < self.min_share {
            (3, "tooFew")
        } else if share > self.max_share && total > 1 {
            (3, "tooMany")
        } else {
            (9, "good")
        };
        Ok(scored(self.id(), score, messages, key, &args))
    }
}

/// Largest stretch of text without the keyphrase or a synonym
#[derive(Debug, Clone, Copy)]
pub struct LargestKeywordDistance {
    good: f64,
    ok: f64,
}

impl LargestKeywordDistance {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            good: thresholds.distance_good,
            ok: thresholds.distance_ok,
        }
    }
}

/// Largest gap between consecutive positions, counting from the start of
/// the text to the first position and from the last position to the end
pub fn largest_gap(positions: &[usize], word_count: usize) -> usize {
    let mut previous = 0;
    let mut largest = 0;
    for &position in positions {
        largest = largest.max(position.saturating_sub(previous));
        previous = position;
    }
    largest.max(word_count.saturating_sub(previous))
}

impl Assessment for LargestKeywordDistance {
    fn id(&self) -> &str {
        "largestKeywordDistance"
    }

    fn name(&self) -> &str {
        "Keyphrase distribution"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Keyphrase
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_keyword && facts.word_count >= 200 && facts.topic_occurrence_count() >= 2)
    }

    fn get_result(
        &self,
        _document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        if facts.word_count == 0 {
            return Ok(AssessmentResult::unscored(self.id()));
        }

        let gap = largest_gap(&facts.topic_positions(), facts.word_count);
        let percent = gap as f64 * 100.0 / facts.word_count as f64;
        log::trace!("largest topic gap: {} words ({:.1}%)", gap, percent);

        let (score, key) = if percent <= self.good {
            (9, "good")
        } else if percent <= self.ok {
            (6, "ok")
        } else {
            (1, "bad")
        };
        Ok(scored(self.id(), score, messages, key, &[]))
    }
}
