use super::{distinct_count_by, Summary};
use crate::table::{TransactionTable, CUSTOMER_CITY, CUSTOMER_ID, SELLER_CITY, SELLER_ID};

/// Distinct customers per customer city, largest first.
pub fn buyer_cities(table: &TransactionTable) -> Summary<String> {
    distinct_count_by(table, CUSTOMER_CITY, CUSTOMER_ID)
}

/// Distinct sellers per seller city, largest first.
pub fn seller_cities(table: &TransactionTable) -> Summary<String> {
    distinct_count_by(table, SELLER_CITY, SELLER_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_util::{table_from_rows, TestRow};

    fn orders() -> TransactionTable {
        table_from_rows(&[
            TestRow::new("o1", "2018-01-01")
                .customer("c1", "sao paulo")
                .seller("s1", "curitiba"),
            TestRow::new("o2", "2018-01-01")
                .customer("c1", "sao paulo")
                .seller("s2", "curitiba"),
            TestRow::new("o3", "2018-01-02")
                .customer("c2", "sao paulo")
                .seller("s1", "curitiba"),
            TestRow::new("o4", "2018-01-02")
                .customer("c3", "rio de janeiro")
                .seller("s3", "sao paulo"),
            TestRow::new("o5", "2018-01-03")
                .customer("c4", "")
                .seller("s4", "ibitinga"),
        ])
    }

    fn pairs(summary: &Summary<String>) -> Vec<(&str, usize)> {
        summary.iter().map(|b| (b.key.as_str(), b.count)).collect()
    }

    #[test]
    fn buyers_per_city() {
        let out = buyer_cities(&orders());
        assert_eq!(pairs(&out), vec![("sao paulo", 2), ("rio de janeiro", 1)]);
    }

    #[test]
    fn sellers_per_city() {
        let out = seller_cities(&orders());
        assert_eq!(
            pairs(&out),
            vec![("curitiba", 2), ("ibitinga", 1), ("sao paulo", 1)]
        );
        assert_eq!(out.total(), 4);
    }

    #[test]
    fn empty_table() {
        let table = TransactionTable::empty();
        assert!(buyer_cities(&table).is_empty());
        assert!(seller_cities(&table).is_empty());
    }
}
