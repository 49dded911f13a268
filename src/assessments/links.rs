//! Outbound and internal link assessments

use super::{scored, Thresholds};
use crate::assessment::{Assessment, RuleCategory, RuleError};
use crate::document::Document;
use crate::messages::MessageFormatter;
use crate::research::{Facts, LinkKind};
use crate::result::AssessmentResult;

/// (total, nofollowed) links of one kind
fn link_counts(facts: &Facts, kind: LinkKind) -> (usize, usize) {
    facts
        .links_of(kind)
        .fold((0, 0), |(total, nofollow), link| {
            (total + 1, nofollow + usize::from(link.anchor.nofollow))
        })
}

/// Links to other sites
#[derive(Debug, Clone, Copy)]
pub struct ExternalLinks {
    none_score: u8,
}

impl ExternalLinks {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            none_score: thresholds.no_external_links_score,
        }
    }
}

impl Assessment for ExternalLinks {
    fn id(&self) -> &str {
        "externalLinks"
    }

    fn name(&self) -> &str {
        "Outbound links"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Links
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_text)
    }

    fn get_result(
        &self,
        _document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let (total, nofollow) = link_counts(facts, LinkKind::External);

        let (score, key) = if total == 0 {
            (self.none_score, "none")
        } else if nofollow == total {
            (7, "nofollow")
        } else if nofollow > 0 {
            (8, "mixed")
        } else {
            (9, "good")
        };
        Ok(scored(self.id(), score, messages, key, &[]))
    }
}

/// Links to the same site
#[derive(Debug, Clone, Copy, Default)]
pub struct InternalLinks;

impl Assessment for InternalLinks {
    fn id(&self) -> &str {
        "internalLinks"
    }

    fn name(&self) -> &str {
        "Internal links"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Links
    }

    fn is_applicable(&self, _document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        Ok(facts.has_text)
    }

    fn get_result(
        &self,
        _document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        let (total, nofollow) = link_counts(facts, LinkKind::Internal);

        let (score, key) = if total == 0 {
            (3, "none")
        } else if nofollow == total {
            (7, "nofollow")
        } else {
            (9, "good")
        };
        Ok(scored(self.id(), score, messages, key, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::test_support::{applies, doc, run};
    use crate::document::DocumentOptions;

    fn page(text: &str) -> Document {
        doc(text, DocumentOptions::new().with_url("https://website.com/post"))
    }

    #[test]
    fn test_external_links() {
        let rule = ExternalLinks::new(&Thresholds::seo());

        assert!(!applies(&rule, &page("")));
        assert_eq!(run(&rule, &page("text")).score, 6);
        assert_eq!(run(&rule, &page(r#"<a href="https://other.org">x</a>"#)).score, 9);
        assert_eq!(
            run(&rule, &page(r#"<a href="https://other.org" rel="nofollow">x</a>"#)).score,
            7
        );
        assert_eq!(
            run(
                &rule,
                &page(r#"<a href="https://a.org" rel="nofollow">x</a> <a href="https://b.org">y</a>"#)
            )
            .score,
            8
        );
        // Same-host links are not outbound
        assert_eq!(run(&rule, &page(r#"<a href="https://website.com/a">x</a>"#)).score, 6);
    }

    #[test]
    fn test_external_links_cornerstone() {
        let rule = ExternalLinks::new(&Thresholds::cornerstone());
        assert_eq!(run(&rule, &page("text")).score, 3);
    }

    #[test]
    fn test_internal_links() {
        let rule = InternalLinks;

        let none = run(&rule, &page("text"));
        assert_eq!(none.score, 3);
        assert!(none.text.starts_with("Internal links:"));

        assert_eq!(run(&rule, &page(r#"<a href="/about">us</a>"#)).score, 9);
        assert_eq!(
            run(&rule, &page(r#"<a href="/about" rel="nofollow">us</a>"#)).score,
            7
        );
    }
}
