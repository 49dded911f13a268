//! Output formatters for assessment reports

mod compact;
mod json;
mod text;

pub use compact::CompactFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::report::{PageReport, Report};
use crate::result::{AssessmentResult, ResultSet};

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format the entire report
    fn format(&self, report: &Report) -> String;

    /// Format the results of a single page
    fn format_page(&self, page: &PageReport) -> String;
}

/// Results a formatter should show: every result, or only valid ones
fn shown(results: &ResultSet, show_all: bool) -> Vec<&AssessmentResult> {
    if show_all {
        results.all().iter().collect()
    } else {
        results.valid()
    }
}
