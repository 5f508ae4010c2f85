//! Per-record problem accumulator and the assertion vocabulary shared by all
//! checkers.
//!
//! Each assertion appends one message when it fails and does nothing when it
//! holds. Failed comparisons append the compared values in parentheses, e.g.
//! `"yearly total differs (120 != 100)"`.

use std::fmt::Display;

use rust_decimal::Decimal;

use crate::values::display_decimal;

/// Messages produced for one record.
///
/// A fresh accumulator is created for every record, so messages never carry
/// over from one record to the next.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Findings {
    messages: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem unconditionally.
    pub fn report(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Generic boolean assertion.
    pub fn ensure(&mut self, check: bool, message: impl Into<String>) {
        if !check {
            self.report(message);
        }
    }

    pub fn equal<T: PartialEq + Display>(&mut self, left: T, right: T, message: &str) {
        if left != right {
            self.report(format!("{} ({} != {})", message, left, right));
        }
    }

    /// `min <= value <= max`. The value is shown rounded to four places.
    pub fn in_range(&mut self, min: Decimal, value: Decimal, max: Decimal, message: &str) {
        if value < min {
            self.report(format!("{} ({} < {})", message, display_decimal(value), min));
        } else if value > max {
            self.report(format!("{} ({} > {})", message, display_decimal(value), max));
        }
    }

    pub fn greater<T: PartialOrd + Display>(&mut self, left: T, right: T, message: &str) {
        if left <= right {
            self.report(format!("{} ({} <= {})", message, left, right));
        }
    }

    pub fn greater_or_equal<T: PartialOrd + Display>(&mut self, left: T, right: T, message: &str) {
        if left < right {
            self.report(format!("{} ({} < {})", message, left, right));
        }
    }

    pub fn less<T: PartialOrd + Display>(&mut self, left: T, right: T, message: &str) {
        if left >= right {
            self.report(format!("{} ({} >= {})", message, left, right));
        }
    }

    pub fn less_or_equal<T: PartialOrd + Display>(&mut self, left: T, right: T, message: &str) {
        if left > right {
            self.report(format!("{} ({} > {})", message, left, right));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}
