//! Fixed-format scalar decoding.
//!
//! Filings carry dates as `YYYYMMDD`, timestamps as `YYYYMMDDHHMMSS` and
//! amounts/percentages as decimal text. Everything here is exact: amounts are
//! parsed into [`Decimal`], never into binary floating point.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

lazy_static! {
    /// Calendar date, `YYYYMMDD`.
    static ref DATE_PATTERN: Regex = Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap();

    /// Timestamp, `YYYYMMDDHHMMSS`.
    static ref DATETIME_PATTERN: Regex =
        Regex::new(r"^(\d{4})(\d{2})(\d{2})(\d{2})(\d{2})(\d{2})$").unwrap();
}

/// Errors from decoding a scalar leaf.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("'{0}' is not a YYYYMMDD date")]
    InvalidDate(String),

    #[error("'{0}' is not a YYYYMMDDHHMMSS timestamp")]
    InvalidDateTime(String),

    #[error("'{0}' is not a decimal number")]
    InvalidDecimal(String),

    #[error("'{0}' is not an integer")]
    InvalidInteger(String),
}

/// Parse a `YYYYMMDD` date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ValueError> {
    let invalid = || ValueError::InvalidDate(text.to_string());
    let caps = DATE_PATTERN.captures(text.trim()).ok_or_else(invalid)?;

    let year: i32 = caps[1].parse().map_err(|_| invalid())?;
    let month: u32 = caps[2].parse().map_err(|_| invalid())?;
    let day: u32 = caps[3].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Parse a `YYYYMMDDHHMMSS` timestamp.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, ValueError> {
    let invalid = || ValueError::InvalidDateTime(text.to_string());
    let caps = DATETIME_PATTERN.captures(text.trim()).ok_or_else(invalid)?;

    let field = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid());
    let year: i32 = caps[1].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)
        .and_then(|date| date.and_hms_opt(field(4).ok()?, field(5).ok()?, field(6).ok()?))
        .ok_or_else(invalid)
}

/// Parse decimal text exactly.
///
/// Accepts plain notation (`1000.50`, `-3`) and, for renderings that emit it,
/// scientific notation (`1.5e3`).
pub fn parse_decimal(text: &str) -> Result<Decimal, ValueError> {
    let trimmed = text.trim();
    let parsed = if trimmed.contains(['e', 'E']) {
        Decimal::from_scientific(trimmed)
    } else {
        Decimal::from_str(trimmed)
    };
    parsed.map_err(|_| ValueError::InvalidDecimal(text.to_string()))
}

/// Parse an integer code such as an allocation category.
pub fn parse_integer(text: &str) -> Result<i64, ValueError> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    // Decoders sometimes render integral codes as "3.0".
    let decimal = parse_decimal(trimmed).map_err(|_| ValueError::InvalidInteger(text.to_string()))?;
    if decimal.fract().is_zero() {
        i64::try_from(decimal.trunc()).map_err(|_| ValueError::InvalidInteger(text.to_string()))
    } else {
        Err(ValueError::InvalidInteger(text.to_string()))
    }
}

/// Resolve a nillable value to `default` when it was marked nil.
///
/// This is the one place a default is substituted; absence of structure is
/// never defaulted.
pub fn or_nil_default<T>(value: Option<T>, default: T) -> T {
    value.unwrap_or(default)
}

/// Render a computed decimal for a problem message: at most four decimal
/// places, trailing digits kept as given.
pub fn display_decimal(value: Decimal) -> String {
    value.round_dp(4).to_string()
}
