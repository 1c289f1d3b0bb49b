//! Pure aggregators over a (usually filtered) transaction table.
//!
//! Every aggregator reads the table by shared reference and returns a fresh
//! [`Summary`]; none of them caches or mutates anything, so they can run in
//! any order or concurrently.

use std::collections::{BTreeMap, HashSet};

use crate::table::TransactionTable;

mod category;
mod city;
mod daily;
mod summary;

pub use category::category_demand;
pub use city::{buyer_cities, seller_cities};
pub use daily::daily_orders;
pub use summary::{Bucket, Summary};

/// Group rows by `key_column` and count distinct non-null `value_column`
/// values in each group, sorted by count descending.
///
/// Rows with a null key or a null value do not contribute, so every bucket
/// has a count of at least one. Groups are collected in key order and the
/// sort is stable, which makes ties come out alphabetically.
pub(crate) fn distinct_count_by(
    table: &TransactionTable,
    key_column: &str,
    value_column: &str,
) -> Summary<String> {
    let keys = table.utf8(key_column);
    let values = table.utf8(value_column);

    let mut groups: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
    for (key, value) in keys.iter().zip(values.iter()) {
        if let (Some(key), Some(value)) = (key, value) {
            groups.entry(key).or_default().insert(value);
        }
    }

    let mut buckets: Vec<Bucket<String>> = groups
        .into_iter()
        .map(|(key, ids)| Bucket {
            key: key.to_string(),
            count: ids.len(),
        })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    Summary::new(buckets)
}
