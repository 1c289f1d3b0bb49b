// src/dashboard.rs
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    aggregate::{self, Bucket, Summary},
    filter::{filter, DateRange},
    render::Presenter,
    table::{DateBounds, TransactionTable},
};

/// How many entries each ranked chart shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub top_categories: usize,
    pub bottom_categories: usize,
    pub top_cities: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            top_categories: 5,
            bottom_categories: 5,
            top_cities: 10,
        }
    }
}

/// Everything one render pass needs, computed from scratch for one range.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardView {
    pub range: DateRange,
    pub total_orders: usize,
    pub daily_orders: Summary<NaiveDate>,
    pub categories: Summary<String>,
    pub buyer_cities: Summary<String>,
    pub seller_cities: Summary<String>,
    pub display: DisplayOptions,
}

impl DashboardView {
    pub fn top_categories(&self) -> &[Bucket<String>] {
        self.categories.top(self.display.top_categories)
    }

    pub fn bottom_categories(&self) -> &[Bucket<String>] {
        self.categories.bottom(self.display.bottom_categories)
    }

    pub fn top_buyer_cities(&self) -> &[Bucket<String>] {
        self.buyer_cities.top(self.display.top_cities)
    }

    pub fn top_seller_cities(&self) -> &[Bucket<String>] {
        self.seller_cities.top(self.display.top_cities)
    }

    pub fn is_empty(&self) -> bool {
        self.daily_orders.is_empty()
    }
}

/// Owns the loaded table and turns a requested date range into a view.
///
/// Holds no derived state: every call to [`Dashboard::compute`] filters and
/// aggregates again.
pub struct Dashboard {
    table: TransactionTable,
    bounds: Option<DateBounds>,
    display: DisplayOptions,
}

impl Dashboard {
    pub fn new(table: TransactionTable, display: DisplayOptions) -> Self {
        let bounds = table.date_bounds();
        info!(rows = table.num_rows(), ?bounds, "dashboard ready");
        Self {
            table,
            bounds,
            display,
        }
    }

    /// Min/max order date of the loaded table.
    pub fn bounds(&self) -> Option<DateBounds> {
        self.bounds
    }

    pub fn display(&self) -> DisplayOptions {
        self.display
    }

    /// Fill missing ends of a requested range from the table bounds.
    ///
    /// With an empty table and nothing requested, falls back to `fallback`.
    pub fn resolve_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        fallback: NaiveDate,
    ) -> Result<DateRange> {
        let (start, end) = match (start, end, self.bounds) {
            (Some(s), Some(e), _) => (s, e),
            // a lone end outside the bounds keeps start <= end
            (Some(s), None, Some(b)) => (s, s.max(b.max)),
            (None, Some(e), Some(b)) => (e.min(b.min), e),
            (None, None, Some(b)) => (b.min, b.max),
            (Some(s), None, None) => (s, s),
            (None, Some(e), None) => (e, e),
            (None, None, None) => (fallback, fallback),
        };
        DateRange::new(start, end)
    }

    /// The range actually filtered on: clamped into the table bounds when it
    /// overlaps them, untouched otherwise.
    pub fn effective_range(&self, requested: DateRange) -> DateRange {
        self.bounds
            .and_then(|b| requested.clamp_to(&b))
            .unwrap_or(requested)
    }

    #[tracing::instrument(level = "info", skip(self, requested), fields(range = %requested))]
    pub fn compute(&self, requested: DateRange) -> Result<DashboardView> {
        let range = self.effective_range(requested);
        let filtered = filter(&self.table, &range)?;
        debug!(rows = filtered.num_rows(), %range, "filtered table");

        let ((daily_orders, categories), (buyer_cities, seller_cities)) = rayon::join(
            || {
                rayon::join(
                    || aggregate::daily_orders(&filtered),
                    || aggregate::category_demand(&filtered),
                )
            },
            || {
                rayon::join(
                    || aggregate::buyer_cities(&filtered),
                    || aggregate::seller_cities(&filtered),
                )
            },
        );

        let total_orders = daily_orders.total();
        info!(
            total_orders,
            days = daily_orders.len(),
            categories = categories.len(),
            "recomputed dashboard"
        );
        Ok(DashboardView {
            range,
            total_orders,
            daily_orders,
            categories,
            buyer_cities,
            seller_cities,
            display: self.display,
        })
    }

    /// Compute for `requested` and hand the result to `presenter`.
    pub fn render(&self, requested: DateRange, presenter: &mut dyn Presenter) -> Result<()> {
        let view = self.compute(requested)?;
        presenter.present(&view)
    }
}
