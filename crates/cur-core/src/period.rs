//! Billing period derived from the invocation date.

use std::fmt;

use jiff::ToSpan;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::Result;

/// The calendar month a report run covers.
///
/// `start` and `end` are both first-of-month boundaries: `start` is the first
/// day of the month before the invocation, `end` the first day of the
/// invocation month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    start: Date,
    end: Date,
    invoked_on: Date,
}

impl BillingPeriod {
    /// Steps back one month from `today`.
    pub fn previous_month(today: Date) -> Result<Self> {
        let end = today.first_of_month();
        let start = end.checked_sub(1.day())?.first_of_month();

        Ok(Self {
            start,
            end,
            invoked_on: today,
        })
    }

    /// First day of the billed month.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// First day of the month after the billed month.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Date the job was invoked on.
    #[inline]
    pub fn invoked_on(&self) -> Date {
        self.invoked_on
    }

    /// CUR directory name, e.g. `20240201-20240301`.
    pub fn billing_period(&self) -> String {
        format!(
            "{}-{}",
            self.start.strftime("%Y%m01"),
            self.end.strftime("%Y%m01")
        )
    }

    /// Lowercase month label, e.g. `february-2024`.
    pub fn month_str(&self) -> String {
        self.start.strftime("%B-%Y").to_string().to_lowercase()
    }

    /// Year and month stamped onto extracted purchase dates.
    pub fn reporting_context(&self) -> ReportingContext {
        ReportingContext {
            year: self.invoked_on.year(),
            month: self.start.month(),
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.billing_period())
    }
}

/// Year and month used to rebuild purchase dates.
///
/// The year is the invocation year and the month is the billed month, so a
/// January run reporting on December carries the new year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingContext {
    pub year: i16,
    pub month: i8,
}

impl ReportingContext {
    /// Creates a context from an explicit year and month.
    pub fn new(year: i16, month: i8) -> Self {
        Self { year, month }
    }

    /// Formats `{year}-{month}-{day}` with zero-padded month and day.
    pub fn date_with_day(&self, day: i8) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, day)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn previous_month_boundaries() {
        let period = BillingPeriod::previous_month(date(2024, 3, 15)).unwrap();
        assert_eq!(period.start(), date(2024, 2, 1));
        assert_eq!(period.end(), date(2024, 3, 1));
        assert_eq!(period.invoked_on(), date(2024, 3, 15));
    }

    #[test]
    fn first_day_of_month_still_steps_back() {
        let period = BillingPeriod::previous_month(date(2024, 3, 1)).unwrap();
        assert_eq!(period.start(), date(2024, 2, 1));
        assert_eq!(period.end(), date(2024, 3, 1));
    }

    #[test]
    fn billing_period_string() {
        let period = BillingPeriod::previous_month(date(2024, 3, 15)).unwrap();
        assert_eq!(period.billing_period(), "20240201-20240301");
        assert_eq!(period.to_string(), "20240201-20240301");
    }

    #[test]
    fn month_str_is_lowercase_full_name() {
        let period = BillingPeriod::previous_month(date(2024, 4, 2)).unwrap();
        assert_eq!(period.month_str(), "march-2024");
    }

    #[test]
    fn january_run_crosses_year() {
        let period = BillingPeriod::previous_month(date(2025, 1, 10)).unwrap();
        assert_eq!(period.billing_period(), "20241201-20250101");
        assert_eq!(period.month_str(), "december-2024");

        // Invocation year, billed month.
        let ctx = period.reporting_context();
        assert_eq!(ctx, ReportingContext::new(2025, 12));
    }

    #[test]
    fn date_with_day_pads() {
        let ctx = ReportingContext::new(2024, 2);
        assert_eq!(ctx.date_with_day(1), "2024-02-01");
        assert_eq!(ctx.date_with_day(28), "2024-02-28");
    }
}
