//! The assessment trait and a closure-backed implementation

use crate::document::Document;
use crate::messages::MessageFormatter;
use crate::research::Facts;
use crate::result::AssessmentResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error raised by an assessment's predicate or scorer
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("missing fact: {0}")]
    MissingFact(String),

    #[error("{0}")]
    Failed(String),
}

/// Assessment category for grouping related assessments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Use of the focus keyphrase and its synonyms in the text
    Keyphrase,
    /// Title, meta description and slug
    Metadata,
    /// Length, headings and images
    #[default]
    Structure,
    /// Outbound and internal links
    Links,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Keyphrase => write!(f, "keyphrase"),
            RuleCategory::Metadata => write!(f, "metadata"),
            RuleCategory::Structure => write!(f, "structure"),
            RuleCategory::Links => write!(f, "links"),
        }
    }
}

impl std::str::FromStr for RuleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keyphrase" | "keyword" => Ok(RuleCategory::Keyphrase),
            "metadata" | "meta" => Ok(RuleCategory::Metadata),
            "structure" | "content" => Ok(RuleCategory::Structure),
            "links" | "link" => Ok(RuleCategory::Links),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// A named rule pairing an applicability predicate with a scorer
pub trait Assessment: Send + Sync {
    /// Stable unique identifier (e.g. "textLength")
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str {
        self.id()
    }

    fn description(&self) -> &str {
        ""
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::default()
    }

    /// Whether the assessment applies to this document
    fn is_applicable(&self, document: &Document, facts: &Facts) -> Result<bool, RuleError>;

    /// Score the document; only called when applicable
    fn get_result(
        &self,
        document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError>;
}

type Predicate = dyn Fn(&Document, &Facts) -> Result<bool, RuleError> + Send + Sync;
type Scorer =
    dyn Fn(&Document, &Facts, &dyn MessageFormatter) -> Result<AssessmentResult, RuleError>
        + Send
        + Sync;

/// An assessment built from an identifier, a predicate and a scorer
#[derive(Clone)]
pub struct FnAssessment {
    id: String,
    name: Option<String>,
    description: String,
    category: RuleCategory,
    predicate: Arc<Predicate>,
    scorer: Arc<Scorer>,
}

impl FnAssessment {
    pub fn new<P, S>(id: &str, predicate: P, scorer: S) -> Self
    where
        P: Fn(&Document, &Facts) -> Result<bool, RuleError> + Send + Sync + 'static,
        S: Fn(&Document, &Facts, &dyn MessageFormatter) -> Result<AssessmentResult, RuleError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            id: id.to_string(),
            name: None,
            description: String::new(),
            category: RuleCategory::default(),
            predicate: Arc::new(predicate),
            scorer: Arc::new(scorer),
        }
    }

    /// An assessment that always applies
    pub fn always<S>(id: &str, scorer: S) -> Self
    where
        S: Fn(&Document, &Facts, &dyn MessageFormatter) -> Result<AssessmentResult, RuleError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(id, |_, _| Ok(true), scorer)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_category(mut self, category: RuleCategory) -> Self {
        self.category = category;
        self
    }
}

impl fmt::Debug for FnAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAssessment")
            .field("id", &self.id)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl Assessment for FnAssessment {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> RuleCategory {
        self.category
    }

    fn is_applicable(&self, document: &Document, facts: &Facts) -> Result<bool, RuleError> {
        (self.predicate)(document, facts)
    }

    fn get_result(
        &self,
        document: &Document,
        facts: &Facts,
        messages: &dyn MessageFormatter,
    ) -> Result<AssessmentResult, RuleError> {
        (self.scorer)(document, facts, messages)
    }
}
