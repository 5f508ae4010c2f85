//! Allocation categories and their regulatory percentage bands.

use std::fmt;

use rust_decimal::Decimal;

/// Classification of a pension contribution (`SUG-HAFRASHA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AllocationCategory {
    /// Severance component.
    Severance,
    /// Employee's own contribution.
    EmployeeContribution,
    /// Employer's contribution.
    EmployerContribution,
    /// Health fund, employee side. Not banded.
    HealthFundEmployee,
    /// Health fund, employer side. Not banded.
    HealthFundEmployer,
}

/// Inclusive `[min, max]` percentage range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageBand {
    pub min: Decimal,
    pub max: Decimal,
}

impl PercentageBand {
    const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the band, both ends included.
    pub fn contains(&self, value: Decimal) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Bands for new comprehensive pension funds.
const SEVERANCE_BAND: PercentageBand = PercentageBand::new(percent(60, 1), percent(833, 2));
const EMPLOYEE_BAND: PercentageBand = PercentageBand::new(percent(60, 1), percent(70, 1));
const EMPLOYER_BAND: PercentageBand = PercentageBand::new(percent(65, 1), percent(75, 1));

/// `digits * 10^-scale` as a const decimal.
const fn percent(digits: u32, scale: u32) -> Decimal {
    Decimal::from_parts(digits, 0, 0, false, scale)
}

impl AllocationCategory {
    /// Every category, in code order.
    pub const ALL: [AllocationCategory; 5] = [
        AllocationCategory::Severance,
        AllocationCategory::EmployeeContribution,
        AllocationCategory::EmployerContribution,
        AllocationCategory::HealthFundEmployee,
        AllocationCategory::HealthFundEmployer,
    ];

    /// Categories subject to a percentage band, in code order.
    pub const BANDED: [AllocationCategory; 3] = [
        AllocationCategory::Severance,
        AllocationCategory::EmployeeContribution,
        AllocationCategory::EmployerContribution,
    ];

    /// Numeric code used in filings.
    pub fn code(&self) -> i64 {
        match self {
            AllocationCategory::Severance => 1,
            AllocationCategory::EmployeeContribution => 2,
            AllocationCategory::EmployerContribution => 3,
            AllocationCategory::HealthFundEmployee => 8,
            AllocationCategory::HealthFundEmployer => 9,
        }
    }

    /// Look up a category by its filing code.
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Short English label.
    pub fn label(&self) -> &'static str {
        match self {
            AllocationCategory::Severance => "severance",
            AllocationCategory::EmployeeContribution => "employee contribution",
            AllocationCategory::EmployerContribution => "employer contribution",
            AllocationCategory::HealthFundEmployee => "health fund (employee)",
            AllocationCategory::HealthFundEmployer => "health fund (employer)",
        }
    }

    /// Regulatory band, if the category has one.
    pub fn band(&self) -> Option<PercentageBand> {
        match self {
            AllocationCategory::Severance => Some(SEVERANCE_BAND),
            AllocationCategory::EmployeeContribution => Some(EMPLOYEE_BAND),
            AllocationCategory::EmployerContribution => Some(EMPLOYER_BAND),
            AllocationCategory::HealthFundEmployee | AllocationCategory::HealthFundEmployer => None,
        }
    }
}

impl fmt::Display for AllocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.code())
    }
}
