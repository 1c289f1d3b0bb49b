use anyhow::{Context, Result};
use std::io::Write;

use super::Presenter;
use crate::dashboard::DashboardView;

/// Writes each view as one pretty-printed JSON document.
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn present(&mut self, view: &DashboardView) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, view).context("serializing dashboard view")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DisplayOptions};
    use crate::table::test_util::{table_from_rows, TestRow};
    use serde_json::Value;

    #[test]
    fn view_serializes_with_dates_and_buckets() -> Result<()> {
        let table = table_from_rows(&[
            TestRow::new("o1", "2018-01-01 10:00:00")
                .customer("c1", "sao paulo")
                .product("p1", "toys"),
            TestRow::new("o2", "2018-01-02 10:00:00")
                .customer("c2", "sao paulo")
                .product("p2", "books"),
        ]);
        let dash = Dashboard::new(table, DisplayOptions::default());
        let range = dash.bounds().unwrap().into();

        let mut presenter = JsonPresenter::new(Vec::new());
        dash.render(range, &mut presenter)?;
        let doc: Value = serde_json::from_slice(&presenter.into_inner())?;

        assert_eq!(doc["total_orders"], 2);
        assert_eq!(doc["range"]["start"], "2018-01-01");
        assert_eq!(doc["daily_orders"][1]["key"], "2018-01-02");
        assert_eq!(doc["buyer_cities"][0]["key"], "sao paulo");
        assert_eq!(doc["buyer_cities"][0]["count"], 2);
        assert_eq!(doc["display"]["top_cities"], 10);
        Ok(())
    }
}
