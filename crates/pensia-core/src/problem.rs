//! Problems found in a filing.
//!
//! Every problem points at the repeated record that violated a rule: the
//! checker's anchor path plus the record's position under it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One rule violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Problem {
    /// Anchor path of the checker that found it
    pub path: String,

    /// Zero-based position of the record under `path`
    pub index: usize,

    /// Human-readable description, including the compared values
    pub message: String,
}

impl Problem {
    pub fn new(path: impl Into<String>, index: usize, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            index,
            message: message.into(),
        }
    }

    /// Pointer to the offending record (e.g., "A/B/C[2]").
    pub fn pointer(&self) -> String {
        format!("{}[{}]", self.path, self.index)
    }

    /// The `(path, index, message)` triple, as written to reports.
    pub fn as_row(&self) -> (&str, usize, &str) {
        (&self.path, self.index, &self.message)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pointer(), self.message)
    }
}
