//! Aggregation of checker results into one report per document.
//!
//! Problems keep the order they were produced in: checkers in registration
//! order, and within a checker the record order of its anchor path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::problem::Problem;

/// Problems produced by one checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerRun {
    pub checker: &'static str,
    pub problems: Vec<Problem>,
}

/// Everything found in one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Flat, ordered list of problems
    pub problems: Vec<Problem>,

    /// Names of the checkers that ran, in order
    pub checkers_run: Vec<String>,

    /// When the document was checked
    pub checked_at: DateTime<Utc>,
}

impl ValidationReport {
    /// Flatten checker runs into a report, preserving their order.
    pub fn aggregate(runs: Vec<CheckerRun>) -> Self {
        let checkers_run = runs.iter().map(|run| run.checker.to_string()).collect();
        let problems = runs.into_iter().flat_map(|run| run.problems).collect();

        Self {
            problems,
            checkers_run,
            checked_at: Utc::now(),
        }
    }

    /// No rule was violated.
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Problems reported under one anchor path.
    pub fn problems_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Problem> + 'a {
        self.problems.iter().filter(move |p| p.path == path)
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            format!("No problems found. {} checkers run.", self.checkers_run.len())
        } else {
            format!(
                "{} problem{} found. {} checkers run.",
                self.problems.len(),
                if self.problems.len() == 1 { "" } else { "s" },
                self.checkers_run.len()
            )
        }
    }
}
