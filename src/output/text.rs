//! Human-readable text output formatter

use super::{shown, OutputFormatter};
use crate::report::{PageOutcome, PageReport, Report};
use crate::result::{AssessmentResult, Rating};
use colored::*;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show results that are not valid as well
    pub show_all: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_all: false,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Show every result of an applicable assessment
    pub fn show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    fn rating_str(&self, rating: Rating) -> ColoredString {
        let s = format!("{:>4}", rating.to_string());
        if !self.colored {
            return s.normal();
        }
        match rating {
            Rating::Good => s.green().bold(),
            Rating::Ok => s.yellow().bold(),
            Rating::Bad => s.red().bold(),
            Rating::None => s.dimmed(),
        }
    }

    fn format_result(&self, result: &AssessmentResult) -> String {
        format!(
            "  {} {} {}\n",
            self.rating_str(result.rating()),
            if self.colored {
                format!("[{}]", result.id).cyan().to_string()
            } else {
                format!("[{}]", result.id)
            },
            result.text
        )
    }

    fn plural(count: usize, singular: &str, plural: &str) -> String {
        format!("{} {}", count, if count == 1 { singular } else { plural })
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> String {
        let mut output = String::new();

        for page in &report.pages {
            output.push_str(&self.format_page(page));
            output.push('\n');
        }

        if self.show_stats {
            let summary = report.summary();
            output.push_str(&Self::plural(summary.pages_assessed, "page", "pages"));
            output.push_str(" assessed");

            let mut counts = Vec::new();
            for (count, label, rating) in [
                (summary.good, "good", Rating::Good),
                (summary.ok, "ok", Rating::Ok),
                (summary.bad, "bad", Rating::Bad),
            ] {
                if count == 0 {
                    continue;
                }
                let s = format!("{} {}", count, label);
                counts.push(if self.colored {
                    match rating {
                        Rating::Good => s.green().to_string(),
                        Rating::Ok => s.yellow().to_string(),
                        _ => s.red().to_string(),
                    }
                } else {
                    s
                });
            }
            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            if summary.pages_failed > 0 {
                let s = format!("; {} failed", summary.pages_failed);
                output.push_str(&if self.colored { s.red().bold().to_string() } else { s });
            }
            output.push('\n');

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                report.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_page(&self, page: &PageReport) -> String {
        let mut output = String::new();
        let name = page.source.display().to_string();
        if self.colored {
            output.push_str(&format!("{}\n", name.underline()));
        } else {
            output.push_str(&format!("{}\n", name));
        }

        match &page.outcome {
            PageOutcome::Assessed(results) => {
                for result in shown(results, self.show_all) {
                    output.push_str(&self.format_result(result));
                }
            }
            PageOutcome::Failed(error) => {
                let label = if self.colored {
                    "error".red().bold().to_string()
                } else {
                    "error".to_string()
                };
                output.push_str(&format!("  {}: {}\n", label, error));
            }
        }

        output
    }
}
