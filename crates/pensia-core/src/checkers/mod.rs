//! Rule checkers.
//!
//! Each checker is bound to one anchor path naming a repeated group of the
//! filing. The shared [`Checker::check`] loop resolves the file header, walks
//! every record under the anchor and hands each one to the checker's rule
//! together with a fresh [`Findings`] accumulator.
//!
//! | # | Checker | Anchor |
//! |---|---------|--------|
//! | 1 | `last-contribution` | most recent contribution entries |
//! | 2 | `ytd-salary` | contribution budget block |
//! | 3 | `ytd-totals` | contribution budget block |
//! | 4 | `allocation-bands` | contribution budget block |
//! | 5 | `entry-percentage` | year-to-date itemized entries |
//! | 6 | `net-gross` | contribution budget block |
//! | 7 | `valuation-date` | policy record |
//! | 8 | `enrollment-date` | policy record |
//!
//! New rules are added by implementing [`Checker`] and appending the type to
//! [`REGISTRY`]; traversal and reporting stay untouched.

mod allocation;
mod contributions;
mod dates;
mod findings;
mod reconciliation;

pub use allocation::{AllocationBandsChecker, EntryPercentageChecker};
pub use contributions::{LastContributionChecker, YtdSalaryChecker, YtdTotalsChecker};
pub use dates::{EnrollmentDateChecker, ValuationDateChecker};
pub use findings::Findings;
pub use reconciliation::NetGrossChecker;

use chrono::NaiveDateTime;

use crate::document::{Document, Record};
use crate::problem::Problem;
use crate::CheckError;

/// File header block.
pub const HEADER_PATH: &str = "KoteretKovetz";

/// Policy (account) records.
pub const POLICY_PATH: &str = "YeshutYatzran/Mutzarim/Mutzar/HeshbonotOPolisot/HeshbonOPolisa";

/// Contribution budget blocks, one or more per policy.
pub const BUDGET_PATH: &str =
    "YeshutYatzran/Mutzarim/Mutzar/HeshbonotOPolisot/HeshbonOPolisa/PirteiTaktziv";

/// Most recent contribution entries of every budget block.
pub const LAST_CONTRIBUTION_PATH: &str =
    "YeshutYatzran/Mutzarim/Mutzar/HeshbonotOPolisot/HeshbonOPolisa/PirteiTaktziv/\
     PirteiHafkadaAchrona/PerutPirteiHafkadaAchrona";

/// Year-to-date itemized contributions of every budget block.
pub const YTD_ENTRY_PATH: &str =
    "YeshutYatzran/Mutzarim/Mutzar/HeshbonotOPolisot/HeshbonOPolisa/PirteiTaktziv/\
     PerutHafkadotMetchilatShana";

/// Decoded file header, read once per checker run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Message type (`SUG-MIMSHAK`)
    pub message_type: String,

    /// As-of business timestamp (`TAARICH-BITZUA`)
    pub executed_at: NaiveDateTime,
}

impl Header {
    pub fn from_document(document: &Document) -> Result<Self, CheckError> {
        let header = document.record(HEADER_PATH)?;
        Ok(Self {
            message_type: header.text("SUG-MIMSHAK")?.to_string(),
            executed_at: header.datetime("TAARICH-BITZUA")?,
        })
    }
}

/// Read-only context shared by every record of one checker run.
#[derive(Debug, Clone)]
pub struct RunContext<'a> {
    pub document: &'a Document,
    pub header: Header,
}

impl<'a> RunContext<'a> {
    pub fn new(document: &'a Document) -> Result<Self, CheckError> {
        Ok(Self {
            document,
            header: Header::from_document(document)?,
        })
    }
}

/// A cross-field rule over one repeated group.
///
/// Implementations are stateless: everything a rule needs arrives through
/// its arguments.
pub trait Checker: Send + Sync {
    /// Stable identifier, used in configuration.
    fn name(&self) -> &'static str;

    /// What the rule verifies.
    fn description(&self) -> &'static str;

    /// Path of the repeated group this checker inspects.
    fn anchor(&self) -> &'static str;

    /// Apply the rule to one record, pushing any violations into `findings`.
    ///
    /// Errors mean the record could not be read at all and abort the whole
    /// document.
    fn check_one(
        &self,
        record: &Record<'_>,
        context: &RunContext<'_>,
        findings: &mut Findings,
    ) -> Result<(), CheckError>;

    /// Run the rule over every record under the anchor path.
    fn check(&self, document: &Document) -> Result<Vec<Problem>, CheckError> {
        let context = RunContext::new(document)?;
        let records = document.records(self.anchor())?;

        let mut problems = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let mut findings = Findings::new();
            self.check_one(record, &context, &mut findings)?;
            problems.extend(
                findings
                    .into_messages()
                    .into_iter()
                    .map(|message| Problem::new(self.anchor(), index, message)),
            );
        }

        tracing::debug!(
            checker = self.name(),
            records = records.len(),
            problems = problems.len(),
            "Checker finished"
        );

        Ok(problems)
    }
}

/// Constructor for a registered checker.
pub type CheckerFactory = fn() -> Box<dyn Checker>;

fn boxed<C: Checker + Default + 'static>() -> Box<dyn Checker> {
    Box::new(C::default())
}

/// Every checker, in the order their problems are reported.
pub const REGISTRY: &[CheckerFactory] = &[
    boxed::<LastContributionChecker>,
    boxed::<YtdSalaryChecker>,
    boxed::<YtdTotalsChecker>,
    boxed::<AllocationBandsChecker>,
    boxed::<EntryPercentageChecker>,
    boxed::<NetGrossChecker>,
    boxed::<ValuationDateChecker>,
    boxed::<EnrollmentDateChecker>,
];

/// Fresh instances of every registered checker.
pub fn all_checkers() -> Vec<Box<dyn Checker>> {
    REGISTRY.iter().map(|factory| factory()).collect()
}

/// Names of every registered checker, in registration order.
pub fn checker_names() -> Vec<&'static str> {
    all_checkers().iter().map(|c| c.name()).collect()
}
