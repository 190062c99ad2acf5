//! Calendar date ranges.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An inclusive range of calendar dates, iterated in ascending daily steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Reject ranges whose start is after their end.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start > self.end {
            return Err(ConfigError::InvalidDateRange(format!(
                "start_date ({}) must be on or before end_date ({})",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Number of dates in the range, `(end - start).days + 1`; zero when inverted.
    pub fn num_days(&self) -> usize {
        let days = (self.end - self.start).num_days();
        if days < 0 {
            0
        } else {
            days as usize + 1
        }
    }

    /// Check if a date falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterate every date from start to end inclusive.
    pub fn iter(&self) -> DateRangeIter {
        DateRangeIter {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the dates of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DateRangeIter {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DateRangeIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        if current > self.end {
            self.next = None;
            return None;
        }
        self.next = current.checked_add_signed(Duration::days(1));
        Some(current)
    }
}
