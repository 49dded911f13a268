//! Assessment orchestration
//!
//! The assessor extracts facts once, walks the registry in order, evaluates
//! each assessment's applicability and collects results of applicable
//! assessments. Any failure aborts the whole call.

use crate::assessment::{Assessment, RuleError};
use crate::document::Document;
use crate::messages::{DefaultMessages, MessageFormatter};
use crate::registry::Registry;
use crate::research::Facts;
use crate::result::{AssessmentResult, ResultSet, ValidityPolicy};
use log::{debug, trace};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Error aborting an assessment run
#[derive(Debug, Error)]
pub enum AssessError {
    #[error("applicability check of '{rule}' failed: {source}")]
    Applicability {
        rule: String,
        #[source]
        source: RuleError,
    },

    #[error("scoring of '{rule}' failed: {source}")]
    Scoring {
        rule: String,
        #[source]
        source: RuleError,
    },
}

impl AssessError {
    /// Identifier of the assessment that failed
    pub fn rule(&self) -> &str {
        match self {
            AssessError::Applicability { rule, .. } | AssessError::Scoring { rule, .. } => rule,
        }
    }
}

/// Runs a registry of assessments over documents
#[derive(Clone)]
pub struct Assessor {
    registry: Arc<Registry>,
    messages: Arc<dyn MessageFormatter>,
    parallel: bool,
    validity: ValidityPolicy,
}

impl Assessor {
    /// Create an assessor with English messages
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            messages: Arc::new(DefaultMessages),
            parallel: false,
            validity: ValidityPolicy::default(),
        }
    }

    pub fn with_messages(mut self, messages: Arc<dyn MessageFormatter>) -> Self {
        self.messages = messages;
        self
    }

    /// Evaluate assessments on the rayon pool; output order is unchanged
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_validity(mut self, validity: ValidityPolicy) -> Self {
        self.validity = validity;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn messages(&self) -> &dyn MessageFormatter {
        self.messages.as_ref()
    }

    /// Assess a document
    pub fn assess(&self, document: &Document) -> Result<ResultSet, AssessError> {
        let start = Instant::now();
        let facts = Facts::extract(document);

        let outcomes: Vec<Result<Option<AssessmentResult>, AssessError>> = if self.parallel {
            self.registry
                .assessments()
                .par_iter()
                .map(|a| self.run_one(a.as_ref(), document, &facts))
                .collect()
        } else {
            self.registry
                .iter()
                .map(|a| self.run_one(a.as_ref(), document, &facts))
                .collect()
        };

        // First failure in registry order wins, so errors are deterministic
        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            if let Some(result) = outcome? {
                results.push(result);
            }
        }

        debug!(
            "assessed document with registry '{}': {} of {} assessments applied in {:?}",
            self.registry.name(),
            results.len(),
            self.registry.len(),
            start.elapsed()
        );

        Ok(ResultSet::new(results, self.validity))
    }

    fn run_one(
        &self,
        assessment: &dyn Assessment,
        document: &Document,
        facts: &Facts,
    ) -> Result<Option<AssessmentResult>, AssessError> {
        let id = assessment.id();

        let applicable = assessment
            .is_applicable(document, facts)
            .map_err(|source| AssessError::Applicability {
                rule: id.to_string(),
                source,
            })?;
        if !applicable {
            trace!("{}: not applicable", id);
            return Ok(None);
        }

        let mut result = assessment
            .get_result(document, facts, self.messages.as_ref())
            .map_err(|source| AssessError::Scoring {
                rule: id.to_string(),
                source,
            })?;

        if result.id != id {
            result.id = id.to_string();
        }
        trace!("{}: score {}", id, result.score);
        Ok(Some(result))
    }
}

impl Default for Assessor {
    fn default() -> Self {
        Self::new(Arc::new(Registry::seo()))
    }
}

/// Assess a document with the default registry
pub fn assess(document: &Document) -> Result<ResultSet, AssessError> {
    Assessor::default().assess(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::FnAssessment;
    use crate::document::DocumentOptions;

    #[test]
    fn test_empty_document_baseline() {
        let results = assess(&Document::new("")).unwrap();
        assert_eq!(
            results.valid_ids(),
            vec!["keyphraseLength", "metaDescriptionLength", "textLength", "titleWidth"]
        );
        assert_eq!(results.ids(), results.valid_ids());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let document = Document::with_options(
            "<p>Some keyword text</p><h2>keyword</h2><a href=\"/x\">x</a>",
            DocumentOptions::new()
                .with_keyword("keyword")
                .with_title("Keyword title")
                .with_url("/keyword"),
        )
        .unwrap();
        let registry = Arc::new(Registry::seo());
        let sequential = Assessor::new(Arc::clone(&registry)).assess(&document).unwrap();
        let parallel = Assessor::new(registry)
            .with_parallel(true)
            .assess(&document)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_failing_scorer_names_rule() {
        let mut registry = Registry::seo();
        registry
            .register(Arc::new(FnAssessment::always("broken", |_, _, _| {
                Err(RuleError::Failed("boom".to_string()))
            })))
            .unwrap();

        let err = Assessor::new(Arc::new(registry))
            .assess(&Document::new("text"))
            .unwrap_err();
        assert!(matches!(err, AssessError::Scoring { .. }));
        assert_eq!(err.rule(), "broken");
        assert_eq!(err.to_string(), "scoring of 'broken' failed: boom");
    }

    #[test]
    fn test_failing_predicate_names_rule() {
        let mut registry = Registry::new("custom");
        registry
            .register(Arc::new(FnAssessment::new(
                "needsFact",
                |_, _| Err(RuleError::MissingFact("readingTime".to_string())),
                |_, _, _| Ok(AssessmentResult::new("needsFact", 9, "")),
            )))
            .unwrap();

        let err = Assessor::new(Arc::new(registry))
            .with_parallel(true)
            .assess(&Document::new(""))
            .unwrap_err();
        assert!(matches!(err, AssessError::Applicability { .. }));
        assert_eq!(err.rule(), "needsFact");
    }

    #[test]
    fn test_parallel_reports_earliest_failure() {
        let mut registry = Registry::seo();
        registry
            .register_at(
                2,
                Arc::new(FnAssessment::always("early", |_, _, _| {
                    Err(RuleError::Failed("first".to_string()))
                })),
            )
            .unwrap();
        registry
            .register(Arc::new(FnAssessment::new(
                "late",
                |_, _| Err(RuleError::MissingFact("readingTime".to_string())),
                |_, _, _| Ok(AssessmentResult::new("late", 9, "")),
            )))
            .unwrap();
        let registry = Arc::new(registry);

        for _ in 0..20 {
            let err = Assessor::new(Arc::clone(&registry))
                .with_parallel(true)
                .assess(&Document::new("text"))
                .unwrap_err();
            assert_eq!(err.rule(), "early");
            assert!(matches!(err, AssessError::Scoring { .. }));
        }
    }

    #[test]
    fn test_result_id_follows_assessment() {
        let mut registry = Registry::new("custom");
        registry
            .register(Arc::new(FnAssessment::always("real", |_, _, _| {
                Ok(AssessmentResult::new("other", 5, ""))
            })))
            .unwrap();
        let results = Assessor::new(Arc::new(registry))
            .assess(&Document::new(""))
            .unwrap();
        assert_eq!(results.ids(), vec!["real"]);
    }
}
