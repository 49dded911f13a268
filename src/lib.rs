//! seo-assess - On-page SEO assessment
//!
//! Scores a page's body text and metadata (SEO title, meta description,
//! URL slug, focus keyphrase and synonyms) against an ordered set of
//! assessments. Each applicable assessment produces a score from 0 to 9
//! and a localized feedback message.
//!
//! # Architecture
//!
//! ```text
//! Page -> Document -> Facts -> Assessor -> Registry -> Assessment -> ResultSet
//! ```
//!
//! The assessor extracts the document's facts once, asks every registered
//! assessment whether it applies, and collects the results of the
//! applicable ones in registration order.
//!
//! # Example
//!
//! ```
//! use seo_assess::{assess, Document, DocumentOptions};
//!
//! let document = Document::with_options(
//!     "Some text about cats.",
//!     DocumentOptions::new().with_keyword("cats").with_title("All about cats"),
//! )
//! .unwrap();
//!
//! let results = assess(&document).unwrap();
//! assert!(results.valid_ids().contains(&"titleKeyword"));
//! ```

pub mod assessment;
pub mod assessments;
pub mod assessor;
pub mod config;
pub mod document;
pub mod messages;
pub mod output;
pub mod page;
pub mod registry;
pub mod report;
pub mod research;
pub mod result;

// Re-export main types
pub use assessment::{Assessment, FnAssessment, RuleCategory, RuleError};
pub use assessments::Thresholds;
pub use assessor::{assess, AssessError, Assessor};
pub use config::Config;
pub use document::{Document, DocumentError, DocumentOptions};
pub use messages::{Catalog, CatalogError, DefaultMessages, MessageFormatter};
pub use page::{Page, PageError};
pub use registry::{Preset, Registry, RegistryError};
pub use report::{PageOutcome, PageReport, Report, Summary};
pub use research::{extract_facts, FactValue, Facts, LinkKind};
pub use result::{AssessmentResult, Rating, ResultSet, ValidityPolicy, MAX_SCORE};
