//! Compact output formatter
//!
//! One line per result, minimal output for scripting.

use super::{shown, OutputFormatter};
use crate::report::{PageOutcome, PageReport, Report};

/// Compact one-line-per-result formatter
pub struct CompactFormatter {
    /// Show rating prefix
    pub show_rating: bool,
    /// Show assessment ID
    pub show_rule: bool,
    /// Show results that are not valid as well
    pub show_all: bool,
}

impl CompactFormatter {
    /// Create a new compact formatter
    pub fn new() -> Self {
        Self {
            show_rating: true,
            show_rule: true,
            show_all: false,
        }
    }

    /// Hide rating prefix
    pub fn without_rating(mut self) -> Self {
        self.show_rating = false;
        self
    }

    /// Hide assessment ID
    pub fn without_rule(mut self) -> Self {
        self.show_rule = false;
        self
    }

    pub fn show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }
}

impl Default for CompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CompactFormatter {
    fn format(&self, report: &Report) -> String {
        report.pages.iter().map(|p| self.format_page(p)).collect()
    }

    fn format_page(&self, page: &PageReport) -> String {
        let file = page.source.display().to_string();

        match &page.outcome {
            PageOutcome::Assessed(results) => shown(results, self.show_all)
                .into_iter()
                .map(|result| {
                    let mut parts = vec![file.clone()];
                    if self.show_rating {
                        parts.push(result.rating().to_string());
                    }
                    if self.show_rule {
                        parts.push(result.id.clone());
                    }
                    parts.push(result.text.clone());
                    parts.join(": ") + "\n"
                })
                .collect(),
            PageOutcome::Failed(error) => format!("{}: error: {}\n", file, error),
        }
    }
}
