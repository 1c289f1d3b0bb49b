//! Fixture helpers shared by the unit tests.

use super::{TransactionTable, COLUMNS};
use crate::load::load_csv;

/// One source row; unset fields stay empty (null once loaded).
#[derive(Clone, Debug, Default)]
pub struct TestRow {
    pub order_id: String,
    pub order_date: String,
    pub customer_id: String,
    pub customer_city: String,
    pub seller_id: String,
    pub seller_city: String,
    pub product_id: String,
    pub product_category_name: String,
}

impl TestRow {
    pub fn new(order_id: &str, order_date: &str) -> Self {
        Self {
            order_id: order_id.into(),
            order_date: order_date.into(),
            ..Default::default()
        }
    }

    pub fn customer(mut self, id: &str, city: &str) -> Self {
        self.customer_id = id.into();
        self.customer_city = city.into();
        self
    }

    pub fn seller(mut self, id: &str, city: &str) -> Self {
        self.seller_id = id.into();
        self.seller_city = city.into();
        self
    }

    pub fn product(mut self, id: &str, category: &str) -> Self {
        self.product_id = id.into();
        self.product_category_name = category.into();
        self
    }

    fn fields(&self) -> [&str; 8] {
        [
            &self.order_id,
            &self.order_date,
            &self.customer_id,
            &self.customer_city,
            &self.seller_id,
            &self.seller_city,
            &self.product_id,
            &self.product_category_name,
        ]
    }
}

/// Render rows as CSV text with the standard header.
pub fn csv_text(rows: &[TestRow]) -> String {
    let mut out = COLUMNS.join(",");
    out.push('\n');
    for row in rows {
        let quoted: Vec<String> = row
            .fields()
            .iter()
            .map(|f| format!("\"{}\"", f))
            .collect();
        out.push_str(&quoted.join(","));
        out.push('\n');
    }
    out
}

/// Load rows through the CSV loader.
pub fn table_from_rows(rows: &[TestRow]) -> TransactionTable {
    load_csv(csv_text(rows).as_bytes()).expect("fixture rows must load")
}

pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ecomdash=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
