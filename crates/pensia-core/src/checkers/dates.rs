//! Chronological ordering of policy dates.

use crate::document::Record;
use crate::CheckError;

use super::{Checker, Findings, RunContext, POLICY_PATH};

/// A policy's valuation date is not after the file's execution date.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValuationDateChecker;

impl Checker for ValuationDateChecker {
    fn name(&self) -> &'static str {
        "valuation-date"
    }

    fn description(&self) -> &'static str {
        "Policy valuation date is not after the file execution date"
    }

    fn anchor(&self) -> &'static str {
        POLICY_PATH
    }

    fn check_one(
        &self,
        record: &Record<'_>,
        context: &RunContext<'_>,
        findings: &mut Findings,
    ) -> Result<(), CheckError> {
        let valuation_date = record.date("TAARICH-NECHONUT")?;
        findings.less_or_equal(
            valuation_date,
            context.header.executed_at.date(),
            "Valuation date is after the execution date",
        );
        Ok(())
    }
}

/// A policy holder joined the product strictly after being born.
///
/// The birth date comes from the customer block of the product enclosing the
/// policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnrollmentDateChecker;

impl Checker for EnrollmentDateChecker {
    fn name(&self) -> &'static str {
        "enrollment-date"
    }

    fn description(&self) -> &'static str {
        "Policy enrollment date is after the holder's birth date"
    }

    fn anchor(&self) -> &'static str {
        POLICY_PATH
    }

    fn check_one(
        &self,
        record: &Record<'_>,
        _context: &RunContext<'_>,
        findings: &mut Findings,
    ) -> Result<(), CheckError> {
        let product = record.ancestor("Mutzar").ok_or_else(|| CheckError::PathNotFound {
            path: POLICY_PATH.to_string(),
            segment: "Mutzar".to_string(),
            at: record.pointer().to_string(),
        })?;
        let customer = product.record("NetuneiMutzar/YeshutLakoach")?;

        let birth_date = customer.date("TAARICH-LEYDA")?;
        let enrollment_date = record.date("TAARICH-HITZTARFUT-MUTZAR")?;

        findings.greater(
            enrollment_date,
            birth_date,
            "Enrollment date is not after the birth date",
        );
        Ok(())
    }
}
