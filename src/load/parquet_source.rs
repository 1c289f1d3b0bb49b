use anyhow::{Context, Result};
use arrow::{compute::concat_batches, record_batch::RecordBatch};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::{fs::File, path::Path};
use tracing::debug;

/// Read every row group of a Parquet file into one batch.
pub fn read_parquet_batch(path: &Path) -> Result<RecordBatch> {
    let file =
        File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("failed to read Parquet metadata of `{}`", path.display()))?;
    let schema = builder.schema().clone();
    let reader = builder.with_batch_size(8192).build()?;

    let batches = reader
        .collect::<std::result::Result<Vec<RecordBatch>, _>>()
        .with_context(|| format!("failed to decode `{}`", path.display()))?;
    debug!(path = %path.display(), batches = batches.len(), "read Parquet source");

    concat_batches(&schema, &batches).context("concatenating Parquet batches")
}
