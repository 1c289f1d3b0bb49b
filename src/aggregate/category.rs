use super::{distinct_count_by, Summary};
use crate::table::{TransactionTable, PRODUCT_CATEGORY_NAME, PRODUCT_ID};

/// Distinct products per category, most demanded first.
pub fn category_demand(table: &TransactionTable) -> Summary<String> {
    distinct_count_by(table, PRODUCT_CATEGORY_NAME, PRODUCT_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_util::{table_from_rows, TestRow};

    fn catalogue() -> TransactionTable {
        let spread = [
            ("toys", 3),
            ("books", 3),
            ("shoes", 1),
            ("games", 1),
            ("tools", 1),
            ("pens", 1),
            ("rugs", 1),
        ];
        let mut rows = Vec::new();
        for (category, products) in spread {
            for n in 0..products {
                let product = format!("{category}-{n}");
                // the same product ordered twice must still count once
                rows.push(TestRow::new("o1", "2018-01-01").product(&product, category));
                rows.push(TestRow::new("o2", "2018-01-02").product(&product, category));
            }
        }
        table_from_rows(&rows)
    }

    #[test]
    fn top_and_bottom_five() {
        let out = category_demand(&catalogue());
        assert_eq!(out.len(), 7);

        let top: Vec<&str> = out.top(5).iter().map(|b| b.key.as_str()).collect();
        let mut leaders = top[..2].to_vec();
        leaders.sort();
        assert_eq!(leaders, vec!["books", "toys"]);

        let bottom = out.bottom(5);
        assert!(bottom.iter().all(|b| b.count == 1));
        assert!(bottom.iter().all(|b| b.key != "toys" && b.key != "books"));
    }

    #[test]
    fn counts_are_distinct_products_and_non_increasing() {
        let out = category_demand(&catalogue());
        assert_eq!(out.total(), 11);
        assert!(out.iter().all(|b| b.count >= 1));
        assert!(out.buckets().windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn repeated_runs_agree() {
        let table = catalogue();
        assert_eq!(category_demand(&table), category_demand(&table));
    }
}
