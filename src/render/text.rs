use anyhow::Result;
use prettytable::{format, Cell, Row, Table};
use std::{fmt::Display, io::Write};

use super::Presenter;
use crate::{aggregate::Bucket, dashboard::DashboardView};

const DEFAULT_BAR_WIDTH: usize = 40;

/// Terminal rendering: headline metric plus one bar chart per summary.
///
/// The first bar of each ranked chart is drawn solid, the rest shaded.
pub struct TextPresenter<W: Write> {
    out: W,
    bar_width: usize,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn section(&mut self, title: &str) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", "-".repeat(title.chars().count()))?;
        Ok(())
    }

    fn chart<K: Display>(&mut self, title: &str, buckets: &[Bucket<K>], ranked: bool) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", title)?;
        if buckets.is_empty() {
            writeln!(self.out, "  (no data in range)")?;
            return Ok(());
        }
        bar_table(buckets, self.bar_width, ranked).print(&mut self.out)?;
        Ok(())
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, view: &DashboardView) -> Result<()> {
        let title = "E-Commerce Dashboard";
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", "=".repeat(title.len()))?;
        writeln!(self.out, "Range: {}", view.range)?;

        self.section("Daily Orders")?;
        writeln!(self.out, "Total orders: {}", view.total_orders)?;
        self.chart("Orders per day", view.daily_orders.buckets(), false)?;

        self.section("Product Categories with the Most and Least Demand")?;
        let top = format!(
            "Top {} Most In-Demand Product Categories",
            view.display.top_categories
        );
        self.chart(&top, view.top_categories(), true)?;
        let bottom = format!(
            "Top {} Least In-Demand Product Categories",
            view.display.bottom_categories
        );
        self.chart(&bottom, view.bottom_categories(), true)?;

        self.section("Customer Demographics")?;
        let buyers = format!("Top {} Cities with the Most Buyers", view.display.top_cities);
        self.chart(&buyers, view.top_buyer_cities(), true)?;
        let sellers = format!("Top {} Cities with the Most Sellers", view.display.top_cities);
        self.chart(&sellers, view.top_seller_cities(), true)?;

        self.out.flush()?;
        Ok(())
    }
}

fn bar_table<K: Display>(buckets: &[Bucket<K>], width: usize, ranked: bool) -> Table {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    for (i, b) in buckets.iter().enumerate() {
        let solid = !ranked || i == 0;
        table.add_row(Row::new(vec![
            Cell::new(&b.key.to_string()),
            Cell::new(&b.count.to_string()).style_spec("r"),
            Cell::new(&bar(b.count, max, width, solid)),
        ]));
    }
    table
}

/// Bar scaled against `max`; any non-zero count gets at least one cell.
fn bar(count: usize, max: usize, width: usize, solid: bool) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let len = (count * width).div_ceil(max);
    let glyph = if solid { "█" } else { "░" };
    glyph.repeat(len)
}
