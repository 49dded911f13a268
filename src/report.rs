//! Per-page results of a CLI run

use crate::result::ResultSet;
use std::path::PathBuf;
use std::time::Duration;

/// What happened to one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Assessment succeeded
    Assessed(ResultSet),
    /// Loading or assessing failed
    Failed(String),
}

/// Outcome for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub source: PathBuf,
    pub outcome: PageOutcome,
}

impl PageReport {
    pub fn assessed(source: impl Into<PathBuf>, results: ResultSet) -> Self {
        Self {
            source: source.into(),
            outcome: PageOutcome::Assessed(results),
        }
    }

    pub fn failed(source: impl Into<PathBuf>, error: impl ToString) -> Self {
        Self {
            source: source.into(),
            outcome: PageOutcome::Failed(error.to_string()),
        }
    }

    pub fn results(&self) -> Option<&ResultSet> {
        match &self.outcome {
            PageOutcome::Assessed(results) => Some(results),
            PageOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Failed(error) => Some(error),
            PageOutcome::Assessed(_) => None,
        }
    }
}

/// Valid-result counts across a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub pages_assessed: usize,
    pub pages_failed: usize,
    pub bad: usize,
    pub ok: usize,
    pub good: usize,
}

/// Results for every page of a run, in input order
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub pages: Vec<PageReport>,
    pub duration: Duration,
}

impl Report {
    pub fn new(pages: Vec<PageReport>) -> Self {
        Self {
            pages,
            duration: Duration::ZERO,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn summary(&self) -> Summary {
        self.pages
            .iter()
            .fold(Summary::default(), |mut summary, page| {
                match page.results() {
                    Some(results) => {
                        let (bad, ok, good) = results.rating_counts();
                        summary.pages_assessed += 1;
                        summary.bad += bad;
                        summary.ok += ok;
                        summary.good += good;
                    }
                    None => summary.pages_failed += 1,
                }
                summary
            })
    }

    pub fn has_failures(&self) -> bool {
        self.pages.iter().any(|p| p.error().is_some())
    }

    /// Exit code (0 = all pages assessed, 1 = a page failed)
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }
}
