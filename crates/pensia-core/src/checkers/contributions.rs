//! Contribution sums and salary consistency.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::category::AllocationCategory;
use crate::document::Record;
use crate::CheckError;

use super::{Checker, Findings, RunContext, BUDGET_PATH, LAST_CONTRIBUTION_PATH};

const AMOUNT: &str = "SCHUM-HAFKADA-SHESHULAM";
const SALARY: &str = "SACHAR-BERAMAT-HAFKADA";
const SALARY_MONTH: &str = "CHODESH-SACHAR";
const CATEGORY: &str = "SUG-HAFRASHA";

/// Yearly total field reported for each summed category.
const YEARLY_TOTALS: [(AllocationCategory, &str); 3] = [
    (AllocationCategory::Severance, "TOTAL-HAFKADOT-PITZUIM-SHANA-NOCHECHIT"),
    (AllocationCategory::EmployeeContribution, "TOTAL-HAFKADOT-OVED-TAGMULIM-SHANA-NOCHECHIT"),
    (AllocationCategory::EmployerContribution, "TOTAL-HAFKADOT-MAAVID-TAGMULIM-SHANA-NOCHECHIT"),
];

/// Exact sum of one decimal field across records.
pub(super) fn sum_field(records: &[Record<'_>], field: &str) -> Result<Decimal, CheckError> {
    records.iter().try_fold(Decimal::ZERO, |sum, record| {
        sum.checked_add(record.decimal(field)?)
            .ok_or_else(|| CheckError::ArithmeticOverflow {
                operation: format!("sum of {}", field),
                pointer: record.pointer().to_string(),
            })
    })
}

fn join_values(values: &BTreeSet<Decimal>) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

/// The itemized parts of the most recent contribution add up to its total and
/// share one salary.
#[derive(Debug, Default, Clone, Copy)]
pub struct LastContributionChecker;

impl Checker for LastContributionChecker {
    fn name(&self) -> &'static str {
        "last-contribution"
    }

    fn description(&self) -> &'static str {
        "Itemized amounts of the most recent contribution sum to its total and share one salary"
    }

    fn anchor(&self) -> &'static str {
        LAST_CONTRIBUTION_PATH
    }

    fn check_one(
        &self,
        record: &Record<'_>,
        _context: &RunContext<'_>,
        findings: &mut Findings,
    ) -> Result<(), CheckError> {
        let total = record.decimal("TOTAL-HAFKADA")?;
        let items = record.records("PerutHafkadaAchrona")?;

        findings.equal(
            sum_field(&items, AMOUNT)?,
            total,
            "Itemized amounts of the last contribution differ from its total",
        );

        let salaries = items
            .iter()
            .map(|item| item.decimal(SALARY))
            .collect::<Result<BTreeSet<_>, _>>()?;
        findings.ensure(
            salaries.len() == 1,
            format!(
                "Salary is not uniform across the last contribution: {}",
                join_values(&salaries)
            ),
        );

        Ok(())
    }
}

/// Year-to-date contributions of the same salary month report one salary.
#[derive(Debug, Default, Clone, Copy)]
pub struct YtdSalaryChecker;

impl Checker for YtdSalaryChecker {
    fn name(&self) -> &'static str {
        "ytd-salary"
    }

    fn description(&self) -> &'static str {
        "Year-to-date contributions of each salary month report a single salary"
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
        let mut by_month: BTreeMap<&str, BTreeSet<Decimal>> = BTreeMap::new();
        for entry in record.records("PerutHafkadotMetchilatShana")? {
            by_month
                .entry(entry.text(SALARY_MONTH)?)
                .or_default()
                .insert(entry.decimal(SALARY)?);
        }

        for (month, salaries) in &by_month {
            findings.ensure(
                salaries.len() == 1,
                format!(
                    "Salary is not uniform for salary month {}: {}",
                    month,
                    join_values(salaries)
                ),
            );
        }

        Ok(())
    }
}

/// Year-to-date contributions summed per category match the yearly totals.
#[derive(Debug, Default, Clone, Copy)]
pub struct YtdTotalsChecker;

impl Checker for YtdTotalsChecker {
    fn name(&self) -> &'static str {
        "ytd-totals"
    }

    fn description(&self) -> &'static str {
        "Year-to-date contributions per category sum to the reported yearly totals"
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
        let mut sums: BTreeMap<AllocationCategory, Vec<Record<'_>>> = BTreeMap::new();
        for entry in record.records("PerutHafkadotMetchilatShana")? {
            sums.entry(entry.category(CATEGORY)?).or_default().push(entry);
        }

        let totals = record.record("HafkadotShnatiyot")?;
        for (category, total_field) in YEARLY_TOTALS {
            let sum = match sums.get(&category) {
                Some(entries) => sum_field(entries, AMOUNT)?,
                None => Decimal::ZERO,
            };
            findings.equal(
                sum,
                totals.decimal(total_field)?,
                &format!(
                    "Year-to-date {} amounts differ from {}",
                    category.label(),
                    total_field
                ),
            );
        }

        Ok(())
    }
}
