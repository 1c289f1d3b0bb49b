// src/filter.rs
use anyhow::{bail, Context, Result};
use arrow::{
    array::TimestampMillisecondArray,
    compute::{and, filter_record_batch, kernels::cmp},
};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt;

use crate::table::{DateBounds, TransactionTable};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Inclusive pair of calendar dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            bail!("range start {} is after end {}", start, end);
        }
        Ok(Self { start, end })
    }

    /// Parse two `YYYY-MM-DD` dates.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Clamp into `bounds`; `None` when the two do not overlap.
    pub fn clamp_to(&self, bounds: &DateBounds) -> Option<Self> {
        let start = self.start.max(bounds.min);
        let end = self.end.min(bounds.max);
        (start <= end).then_some(Self { start, end })
    }

    fn start_millis(&self) -> i64 {
        self.start.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
    }

    /// Last millisecond of the end day.
    fn end_millis(&self) -> i64 {
        self.end.and_time(NaiveTime::MIN).and_utc().timestamp_millis() + MILLIS_PER_DAY - 1
    }
}

impl From<DateBounds> for DateRange {
    fn from(bounds: DateBounds) -> Self {
        Self {
            start: bounds.min,
            end: bounds.max,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date `{}`, expected YYYY-MM-DD", raw.trim()))
}

/// Rows whose order day lies in `range`, both ends inclusive.
///
/// Row order is preserved. No match yields an empty table.
pub fn filter(table: &TransactionTable, range: &DateRange) -> Result<TransactionTable> {
    let dates = table.order_dates();
    let lo = TimestampMillisecondArray::new_scalar(range.start_millis());
    let hi = TimestampMillisecondArray::new_scalar(range.end_millis());

    let mask = and(&cmp::gt_eq(dates, &lo)?, &cmp::lt_eq(dates, &hi)?)?;
    let batch = filter_record_batch(table.batch(), &mask).context("filtering by date range")?;
    TransactionTable::try_new(batch)
}
