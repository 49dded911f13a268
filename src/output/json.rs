//! JSON output formatter

use super::{shown, OutputFormatter};
use crate::report::{PageReport, Report};
use crate::result::AssessmentResult;
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,

    /// Include results that are not valid
    pub show_all: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    fn to_json<T: Serialize>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value).unwrap_or_default()
        } else {
            serde_json::to_string(value).unwrap_or_default()
        }
    }

    fn page<'a>(&self, page: &'a PageReport) -> JsonPage<'a> {
        let results = page.results().map(|results| {
            shown(results, self.show_all)
                .into_iter()
                .map(|r| JsonResult::new(r, r.is_valid(results.policy())))
                .collect()
        });
        JsonPage {
            file: page.source.display().to_string(),
            results,
            error: page.error(),
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    pages: Vec<JsonPage<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonPage<'a> {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<Vec<JsonResult<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    id: &'a str,
    score: u8,
    rating: String,
    text: &'a str,
    valid: bool,
}

impl<'a> JsonResult<'a> {
    fn new(result: &'a AssessmentResult, valid: bool) -> Self {
        Self {
            id: &result.id,
            score: result.score,
            rating: result.rating().to_string(),
            text: &result.text,
            valid,
        }
    }
}

#[derive(Serialize)]
struct JsonSummary {
    pages_assessed: usize,
    pages_failed: usize,
    good: usize,
    ok: usize,
    bad: usize,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> String {
        let summary = report.summary();
        let output = JsonOutput {
            pages: report.pages.iter().map(|p| self.page(p)).collect(),
            summary: JsonSummary {
                pages_assessed: summary.pages_assessed,
                pages_failed: summary.pages_failed,
                good: summary.good,
                ok: summary.ok,
                bad: summary.bad,
                duration_ms: report.duration.as_millis(),
            },
        };
        self.to_json(&output)
    }

    fn format_page(&self, page: &PageReport) -> String {
        self.to_json(&self.page(page))
    }
}
