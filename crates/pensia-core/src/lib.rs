//! # pensia-core
//!
//! Cross-field validation of decoded pension product filings.
//!
//! A schema decoder guarantees a filing's shape; this crate checks the rules
//! a schema cannot express:
//! - itemized contributions add up to the reported totals
//! - declared allocation percentages fall within the regulatory bands
//! - net amounts reconcile with gross amounts and deductions
//! - dates respect chronological order
//!
//! ## Key Guarantees
//!
//! 1. **Exact**: amounts and percentages are compared as decimals, never floats
//! 2. **Deterministic**: the same document always yields the same problems, in
//!    the same order
//! 3. **Located**: every problem names the anchor path and record index it
//!    came from
//! 4. **Independent**: checkers share no state, so documents can be validated
//!    on separate threads
//!
//! ## Example
//!
//! ```rust,ignore
//! use pensia_core::{validate, Document};
//!
//! let document = Document::from_file("filing.json")?;
//! for problem in validate(&document)? {
//!     println!("{}", problem);
//! }
//! ```

pub mod category;
pub mod checkers;
pub mod config;
pub mod document;
pub mod problem;
pub mod report;
pub mod values;

// Re-export main types at crate root
pub use category::{AllocationCategory, PercentageBand};
pub use checkers::{all_checkers, checker_names, Checker, Findings, Header, RunContext};
pub use config::{ConfigError, ValidationConfig};
pub use document::{Document, DocumentError, Node, Record};
pub use problem::Problem;
pub use report::{CheckerRun, ValidationReport};
pub use values::ValueError;

use thiserror::Error;

/// Reasons a document cannot be validated at all.
///
/// Rule violations are never errors; they are [`Problem`]s. These errors
/// abandon the whole document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("Path '{path}' not found: no '{segment}' under {at}")]
    PathNotFound {
        path: String,
        segment: String,
        at: String,
    },

    #[error("Missing field '{field}' in {pointer}")]
    MissingField { field: String, pointer: String },

    #[error("Expected a {expected} at {pointer}, found a {found}")]
    UnexpectedShape {
        pointer: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Path '{path}' matched {count} nodes, expected exactly one")]
    Ambiguous { path: String, count: usize },

    #[error("Invalid '{field}' in {pointer}: {source}")]
    InvalidValue {
        field: String,
        pointer: String,
        #[source]
        source: ValueError,
    },

    #[error("Unknown allocation category {code} in {pointer}")]
    UnknownCategory { code: i64, pointer: String },

    #[error("Arithmetic overflow computing {operation} in {pointer}")]
    ArithmeticOverflow { operation: String, pointer: String },
}

/// Runs the registered checkers over documents.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator, rejecting configurations that name unknown checkers.
    pub fn new(config: ValidationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Run every enabled checker, fresh for this document, in registration
    /// order.
    ///
    /// The first [`CheckError`] abandons the document.
    pub fn run(&self, document: &Document) -> Result<ValidationReport, CheckError> {
        let mut runs = Vec::new();

        for checker in all_checkers() {
            if !self.config.is_enabled(checker.name()) {
                tracing::debug!(checker = checker.name(), "Checker disabled, skipping");
                continue;
            }

            let problems = checker.check(document).inspect_err(|e| {
                tracing::warn!(checker = checker.name(), error = %e, "Document abandoned");
            })?;

            runs.push(CheckerRun {
                checker: checker.name(),
                problems,
            });
        }

        Ok(ValidationReport::aggregate(runs))
    }

    /// Run every enabled checker and return only the flat problem list.
    pub fn validate(&self, document: &Document) -> Result<Vec<Problem>, CheckError> {
        self.run(document).map(|report| report.problems)
    }
}

/// Validate a document with every registered checker.
///
/// This is the main entry point.
pub fn validate(document: &Document) -> Result<Vec<Problem>, CheckError> {
    Validator::default().validate(document)
}
