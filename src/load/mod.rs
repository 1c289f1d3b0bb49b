// src/load/mod.rs
use anyhow::{anyhow, bail, Context, Result};
use arrow::{
    array::{ArrayRef, UInt32Array},
    compute::{concat_batches, filter, is_not_null, take_record_batch},
    record_batch::RecordBatch,
};
use glob::glob;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info};

use crate::table::{transaction_schema, TransactionTable, COLUMNS, ORDER_DATE};

pub mod convert;
pub mod csv_source;
pub mod parquet_source;

/// Load a transaction table from a path or a glob pattern.
///
/// Files ending in `.parquet` are read as Parquet, everything else as CSV.
/// Several matches are concatenated in path order before sorting.
#[tracing::instrument(level = "info")]
pub fn load(source: &str) -> Result<TransactionTable> {
    let path = Path::new(source);
    if path.exists() {
        return load_path(path);
    }
    if !source.contains(['*', '?', '[']) {
        bail!("source file `{}` not found", source);
    }

    let paths: Vec<PathBuf> = glob(source)
        .with_context(|| format!("invalid glob pattern `{}`", source))?
        .filter_map(|p| p.ok())
        .filter(|p| p.is_file())
        .collect();
    if paths.is_empty() {
        bail!("no files match `{}`", source);
    }
    info!("found {} files matching {}", paths.len(), source);

    let batches = paths
        .iter()
        .map(|p| read_source(p).and_then(|raw| normalize(&raw)))
        .collect::<Result<Vec<_>>>()?;
    finish(batches)
}

/// Load a single CSV or Parquet file.
pub fn load_path(path: &Path) -> Result<TransactionTable> {
    let raw = read_source(path)?;
    finish(vec![normalize(&raw)?])
}

/// Load CSV bytes from any reader.
pub fn load_csv<R: Read>(reader: R) -> Result<TransactionTable> {
    let raw = csv_source::read_csv_batch(reader)?;
    finish(vec![normalize(&raw)?])
}

fn read_source(path: &Path) -> Result<RecordBatch> {
    let is_parquet = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        parquet_source::read_parquet_batch(path)
    } else {
        let file =
            File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
        csv_source::read_csv_batch(BufReader::new(file))
            .with_context(|| format!("failed to read `{}`", path.display()))
    }
}

/// Project the required columns, type them, and drop rows whose order date
/// did not parse.
pub fn normalize(raw: &RecordBatch) -> Result<RecordBatch> {
    let raw_schema = raw.schema();
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(COLUMNS.len());
    for &name in COLUMNS.iter() {
        let idx = raw_schema
            .index_of(name)
            .map_err(|_| anyhow!("missing required column `{}`", name))?;
        let col = raw.column(idx);
        let typed = if name == ORDER_DATE {
            Arc::new(convert::to_timestamp_millis(col)?) as ArrayRef
        } else {
            convert::to_clean_utf8(col)?
        };
        columns.push(typed);
    }

    let keep = is_not_null(columns[1].as_ref())?;
    let dropped = keep.false_count();
    if dropped > 0 {
        info!(dropped, "dropped rows with unparseable order_date");
    }
    let columns = columns
        .iter()
        .map(|c| filter(c.as_ref(), &keep))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    RecordBatch::try_new(transaction_schema(), columns).context("building transaction batch")
}

/// Concatenate normalized batches and sort by order date ascending.
///
/// The sort is stable, so rows sharing a timestamp keep source order.
pub fn finish(batches: Vec<RecordBatch>) -> Result<TransactionTable> {
    let schema = transaction_schema();
    let combined = concat_batches(&schema, &batches).context("concatenating sources")?;
    let table = TransactionTable::try_new(combined)?;

    let dates = table.order_dates();
    let mut order: Vec<u32> = (0..table.num_rows() as u32).collect();
    order.sort_by_key(|&i| dates.value(i as usize));
    let indices = UInt32Array::from(order);
    let sorted = take_record_batch(table.batch(), &indices).context("sorting by order_date")?;

    let table = TransactionTable::try_new(sorted)?;
    debug!(rows = table.num_rows(), "loaded transaction table");
    Ok(table)
}
