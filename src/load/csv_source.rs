use crate::table::{utils::clean_header, COLUMNS};
use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{ArrayRef, StringBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use csv::ReaderBuilder;
use std::{io::Read, sync::Arc};
use tracing::debug;

/// Read CSV bytes into an all-Utf8 batch holding just the required columns.
///
/// Extra columns are skipped; a missing required column is an error.
pub fn read_csv_batch<R: Read>(reader: R) -> Result<RecordBatch> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // short rows read as nulls rather than failing the load
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("reading CSV header")?
        .iter()
        .map(clean_header)
        .collect();

    let positions = COLUMNS
        .iter()
        .map(|&name| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow!("missing required column `{}`", name))
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut builders: Vec<StringBuilder> = COLUMNS.iter().map(|_| StringBuilder::new()).collect();
    let mut rows = 0usize;
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        for (builder, &pos) in builders.iter_mut().zip(&positions) {
            builder.append_option(record.get(pos));
        }
        rows += 1;
    }
    debug!(rows, columns = headers.len(), "read CSV source");

    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|&name| Field::new(name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = builders
        .into_iter()
        .map(|mut b| Arc::new(b.finish()) as ArrayRef)
        .collect();

    RecordBatch::try_new(schema, columns).context("building raw CSV batch")
}
