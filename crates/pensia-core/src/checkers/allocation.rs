//! Allocation percentages against the regulatory bands.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::category::AllocationCategory;
use crate::document::Record;
use crate::CheckError;

use super::{Checker, Findings, RunContext, BUDGET_PATH, YTD_ENTRY_PATH};

const CATEGORY: &str = "SUG-HAFRASHA";

/// Declared allocation percentages: every banded category exactly once and
/// within its band.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllocationBandsChecker;

impl Checker for AllocationBandsChecker {
    fn name(&self) -> &'static str {
        "allocation-bands"
    }

    fn description(&self) -> &'static str {
        "Each allocation category is declared once with a percentage inside its regulatory band"
    }

    fn anchor(&self) -> &'static str {
        BUDGET_PATH
    }

    fn check_one(
        &self,
        record: &Record<'_>,
        _context: &RunContext<'_>,
        findings: &mut Findings,
    ) -> Result<(), CheckError> {
        let mut percentages: BTreeMap<AllocationCategory, Decimal> = BTreeMap::new();
        for entry in record.records("PerutHafrashotLePolisa")? {
            let category = entry.category(CATEGORY)?;
            findings.ensure(
                !percentages.contains_key(&category),
                format!("Allocation category {} appears more than once", category),
            );
            percentages.insert(category, entry.decimal("ACHUZ-HAFRASHA")?);
        }

        for category in AllocationCategory::BANDED {
            let Some(band) = category.band() else {
                continue;
            };
            match percentages.get(&category) {
                Some(&percentage) => findings.in_range(
                    band.min,
                    percentage,
                    band.max,
                    &format!("Allocation category {} is outside the permitted range", category),
                ),
                None => findings.report(format!("Missing allocation category {}", category)),
            }
        }

        Ok(())
    }
}

/// Each banded year-to-date contribution, as a percentage of its salary, lies
/// within the category's band.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntryPercentageChecker;

impl Checker for EntryPercentageChecker {
    fn name(&self) -> &'static str {
        "entry-percentage"
    }

    fn description(&self) -> &'static str {
        "Each year-to-date contribution is within its category band as a percentage of salary"
    }

    fn anchor(&self) -> &'static str {
        YTD_ENTRY_PATH
    }

    fn check_one(
        &self,
        record: &Record<'_>,
        _context: &RunContext<'_>,
        findings: &mut Findings,
    ) -> Result<(), CheckError> {
        let category = record.category(CATEGORY)?;
        let Some(band) = category.band() else {
            return Ok(());
        };

        let salary = record.decimal("SACHAR-BERAMAT-HAFKADA")?;
        let amount = record.decimal("SCHUM-HAFKADA-SHESHULAM")?;

        if salary.is_zero() {
            findings.report(format!(
                "Salary is zero, contribution {} of category {} \
                 cannot be expressed as a percentage",
                amount, category
            ));
            return Ok(());
        }

        let percentage = amount
            .checked_div(salary)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| CheckError::ArithmeticOverflow {
                operation: format!("{} / {} * 100", amount, salary),
                pointer: record.pointer().to_string(),
            })?;

        findings.in_range(
            band.min,
            percentage,
            band.max,
            &format!(
                "Contribution of category {} as a percentage of salary \
                 is outside the permitted range",
                category
            ),
        );

        Ok(())
    }
}
