// src/table/mod.rs
use anyhow::{bail, Result};
use arrow::{
    array::{Array, StringArray, TimestampMillisecondArray},
    datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit},
    record_batch::RecordBatch,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

pub mod date_parser;
pub mod utils;

#[cfg(test)]
pub mod test_util;

pub const ORDER_ID: &str = "order_id";
pub const ORDER_DATE: &str = "order_date";
pub const CUSTOMER_ID: &str = "customer_id";
pub const CUSTOMER_CITY: &str = "customer_city";
pub const SELLER_ID: &str = "seller_id";
pub const SELLER_CITY: &str = "seller_city";
pub const PRODUCT_ID: &str = "product_id";
pub const PRODUCT_CATEGORY_NAME: &str = "product_category_name";

/// Required source columns, in table order.
pub const COLUMNS: [&str; 8] = [
    ORDER_ID,
    ORDER_DATE,
    CUSTOMER_ID,
    CUSTOMER_CITY,
    SELLER_ID,
    SELLER_CITY,
    PRODUCT_ID,
    PRODUCT_CATEGORY_NAME,
];

/// Arrow schema of a loaded transaction table.
///
/// `order_date` is a naive millisecond timestamp and never null; every other
/// column is nullable UTF-8.
pub fn transaction_schema() -> SchemaRef {
    let fields: Vec<Field> = COLUMNS
        .iter()
        .map(|&name| {
            if name == ORDER_DATE {
                Field::new(
                    name,
                    DataType::Timestamp(TimeUnit::Millisecond, None),
                    false,
                )
            } else {
                Field::new(name, DataType::Utf8, true)
            }
        })
        .collect();
    Arc::new(Schema::new(fields))
}

/// Inclusive calendar-date bounds of a table's order dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// An immutable, schema-checked table of transaction rows.
///
/// Cloning is cheap: the underlying Arrow buffers are reference counted.
#[derive(Clone, Debug)]
pub struct TransactionTable {
    batch: RecordBatch,
}

impl TransactionTable {
    /// Wrap a batch, rejecting anything that does not match [`transaction_schema`].
    pub fn try_new(batch: RecordBatch) -> Result<Self> {
        let expected = transaction_schema();
        let actual = batch.schema();
        if actual.fields().len() != expected.fields().len() {
            bail!(
                "expected {} columns, batch has {}",
                expected.fields().len(),
                actual.fields().len()
            );
        }
        for (want, got) in expected.fields().iter().zip(actual.fields()) {
            if want.name() != got.name() || want.data_type() != got.data_type() {
                bail!(
                    "column mismatch: expected `{}` ({}), found `{}` ({})",
                    want.name(),
                    want.data_type(),
                    got.name(),
                    got.data_type()
                );
            }
        }
        if batch.column(1).null_count() > 0 {
            bail!("`{}` must not contain nulls", ORDER_DATE);
        }
        Ok(Self { batch })
    }

    pub fn empty() -> Self {
        Self {
            batch: RecordBatch::new_empty(transaction_schema()),
        }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    pub fn order_dates(&self) -> &TimestampMillisecondArray {
        self.batch
            .column(1)
            .as_any()
            .downcast_ref::<TimestampMillisecondArray>()
            .expect("order_date must be TimestampMillisecondArray")
    }

    /// One of the UTF-8 columns by name.
    pub fn utf8(&self, name: &str) -> &StringArray {
        let idx = COLUMNS
            .iter()
            .position(|&c| c == name)
            .unwrap_or_else(|| panic!("`{}` is not a transaction column", name));
        self.batch
            .column(idx)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap_or_else(|| panic!("`{}` must be StringArray", name))
    }

    pub fn order_datetime(&self, row: usize) -> Option<NaiveDateTime> {
        self.order_dates().value_as_datetime(row)
    }

    /// Earliest and latest order day, `None` when the table is empty.
    pub fn date_bounds(&self) -> Option<DateBounds> {
        let dates = self.order_dates();
        let min = arrow::compute::min(dates)?;
        let max = arrow::compute::max(dates)?;
        Some(DateBounds {
            min: arrow::temporal_conversions::timestamp_ms_to_datetime(min)?.date(),
            max: arrow::temporal_conversions::timestamp_ms_to_datetime(max)?.date(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::{table_from_rows, TestRow};
    use super::*;

    #[test]
    fn empty_table_has_no_bounds() {
        let table = TransactionTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.date_bounds(), None);
    }

    #[test]
    fn bounds_truncate_to_calendar_days() {
        let table = table_from_rows(&[
            TestRow::new("o1", "2018-01-03 23:10:00"),
            TestRow::new("o2", "2018-01-01 00:00:01"),
            TestRow::new("o3", "2018-02-10 12:00:00"),
        ]);
        let bounds = table.date_bounds().unwrap();
        assert_eq!(bounds.min, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(bounds.max, NaiveDate::from_ymd_opt(2018, 2, 10).unwrap());
    }

    #[test]
    fn try_new_rejects_foreign_schema() {
        let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Utf8, true)]));
        let batch = RecordBatch::new_empty(schema);
        assert!(TransactionTable::try_new(batch).is_err());
    }
}
