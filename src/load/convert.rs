use crate::table::{date_parser, utils};
use anyhow::{bail, Context, Result};
use arrow::{
    array::{Array, ArrayRef, StringArray, TimestampMillisecondArray},
    compute::cast,
    datatypes::{DataType, TimeUnit},
};
use std::sync::Arc;

/// Convert a raw `order_date` column into naive millisecond timestamps.
///
/// Strings go through the date parser; values that fail to parse become
/// null. Typed date/timestamp columns are cast.
pub fn to_timestamp_millis(arr: &ArrayRef) -> Result<TimestampMillisecondArray> {
    match arr.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let strings = as_utf8(arr)?;
            Ok(strings
                .iter()
                .map(|opt| opt.and_then(date_parser::parse_order_timestamp_millis))
                .collect())
        }
        DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64 => {
            let target = DataType::Timestamp(TimeUnit::Millisecond, None);
            let casted = cast(arr, &target).context("casting order_date to timestamp")?;
            Ok(casted
                .as_any()
                .downcast_ref::<TimestampMillisecondArray>()
                .context("cast produced an unexpected array type")?
                .clone())
        }
        other => bail!("unsupported order_date type {}", other),
    }
}

/// Cast to UTF-8 and clean every value; blank values become null.
pub fn to_clean_utf8(arr: &ArrayRef) -> Result<ArrayRef> {
    let strings = as_utf8(arr)?;
    let cleaned: StringArray = strings
        .iter()
        .map(|opt| opt.and_then(utils::clean_field))
        .collect();
    Ok(Arc::new(cleaned) as ArrayRef)
}

fn as_utf8(arr: &ArrayRef) -> Result<StringArray> {
    let casted = match arr.data_type() {
        DataType::Utf8 => arr.clone(),
        _ => cast(arr, &DataType::Utf8)
            .with_context(|| format!("casting {} column to Utf8", arr.data_type()))?,
    };
    Ok(casted
        .as_any()
        .downcast_ref::<StringArray>()
        .context("expected a Utf8 column")?
        .clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Date32Array, Int64Array};

    #[test]
    fn unparseable_strings_become_null() -> Result<()> {
        let raw: ArrayRef = Arc::new(StringArray::from(vec![
            Some("2018-01-01 10:00:00"),
            Some(""),
            None,
            Some("yesterday"),
        ]));
        let ts = to_timestamp_millis(&raw)?;
        assert_eq!(ts.len(), 4);
        assert!(ts.is_valid(0));
        assert_eq!(ts.null_count(), 3);
        Ok(())
    }

    #[test]
    fn date32_is_cast_to_midnight() -> Result<()> {
        let raw: ArrayRef = Arc::new(Date32Array::from(vec![1]));
        let ts = to_timestamp_millis(&raw)?;
        assert_eq!(ts.value(0), 86_400_000);
        Ok(())
    }

    #[test]
    fn numeric_ids_are_stringified() -> Result<()> {
        let raw: ArrayRef = Arc::new(Int64Array::from(vec![Some(42), None]));
        let out = to_clean_utf8(&raw)?;
        let out = out.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(out.value(0), "42");
        assert!(out.is_null(1));
        Ok(())
    }
}
