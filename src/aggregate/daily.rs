use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use super::{Bucket, Summary};
use crate::table::{TransactionTable, ORDER_ID};

/// Distinct orders per calendar day, in date order.
///
/// A day whose rows all lack an order id still gets a bucket, with count 0.
pub fn daily_orders(table: &TransactionTable) -> Summary<NaiveDate> {
    let orders = table.utf8(ORDER_ID);

    let mut days: BTreeMap<NaiveDate, HashSet<&str>> = BTreeMap::new();
    for (row, order_id) in orders.iter().enumerate() {
        let Some(day) = table.order_datetime(row).map(|dt| dt.date()) else {
            continue;
        };
        let ids = days.entry(day).or_default();
        if let Some(id) = order_id {
            ids.insert(id);
        }
    }

    Summary::new(
        days.into_iter()
            .map(|(key, ids)| Bucket {
                key,
                count: ids.len(),
            })
            .collect(),
    )
}
