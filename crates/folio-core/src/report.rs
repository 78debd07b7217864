//! # Reporting Engine
//!
//! Summary figures over the inventory and sales tables.
//!
//! ```text
//! ┌──────────────┐      inventory_report()      ┌───────────────────┐
//! │  &[Book]     │ ───────────────────────────► │  InventoryReport  │
//! └──────────────┘                              └───────────────────┘
//! ┌──────────────┐      sales_report()          ┌───────────────────┐
//! │ &[SaleRecord]│ ───────────────────────────► │  SalesReport      │
//! └──────────────┘                              └───────────────────┘
//!        │              sales_breakdown()       ┌───────────────────┐
//!        └───────── + &[Book] ────────────────► │ Vec<BreakdownRow> │
//!                                               └───────────────────┘
//! ```
//!
//! All functions are pure and never fail: an empty table yields zero totals,
//! `None` averages and empty rankings.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Book, SaleRecord};
use crate::TOP_N;

/// Group label for sales whose title is no longer stocked.
pub const UNKNOWN_GROUP: &str = "Unknown";

// =============================================================================
// Inventory Report
// =============================================================================

/// Stock and valuation summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct InventoryReport {
    /// Sum of stock over all titles.
    pub total_stock: i64,
    /// Sum of price × stock.
    pub total_value: Money,
    /// Mean price over distinct titles; `None` when inventory is empty.
    pub average_price: Option<Money>,
    pub unique_titles: usize,
    /// Most expensive titles first; equal prices keep table order.
    pub top_by_price: Vec<Book>,
}

/// Builds the inventory summary.
pub fn inventory_report(books: &[Book]) -> InventoryReport {
    let total_stock = books.iter().map(Book::quantity).sum();
    let total_value = books.iter().map(Book::stock_value).sum();
    let price_sum: Money = books.iter().map(Book::price).sum();
    let average_price = (!books.is_empty()).then(|| price_sum.div_round(books.len() as i64));

    // sort_by is stable, so ties stay in table order
    let mut by_price: Vec<&Book> = books.iter().collect();
    by_price.sort_by(|a, b| b.price().cmp(&a.price()));
    let top_by_price = by_price.into_iter().take(TOP_N).cloned().collect();

    InventoryReport {
        total_stock,
        total_value,
        average_price,
        unique_titles: books.len(),
        top_by_price,
    }
}

// =============================================================================
// Sales Report
// =============================================================================

/// Units sold for one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct TitleSales {
    pub title: String,
    pub units: i64,
}

/// Revenue and volume summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SalesReport {
    pub total_revenue: Money,
    pub total_units: i64,
    /// Mean revenue per sale record; `None` when there are no sales.
    pub average_sale: Option<Money>,
    pub transactions: usize,
    /// Best sellers by units; ties broken by title ascending.
    pub top_sellers: Vec<TitleSales>,
}

/// Builds the sales summary.
pub fn sales_report(sales: &[SaleRecord]) -> SalesReport {
    let total_revenue: Money = sales.iter().map(SaleRecord::revenue).sum();
    let total_units = sales.iter().map(SaleRecord::quantity_sold).sum();
    let average_sale = (!sales.is_empty()).then(|| total_revenue.div_round(sales.len() as i64));

    // BTreeMap yields titles ascending; the stable sort keeps that for ties
    let mut units_by_title: BTreeMap<&str, i64> = BTreeMap::new();
    for sale in sales {
        *units_by_title.entry(sale.title()).or_default() += sale.quantity_sold();
    }
    let mut ranked: Vec<TitleSales> = units_by_title
        .into_iter()
        .map(|(title, units)| TitleSales {
            title: title.to_string(),
            units,
        })
        .collect();
    ranked.sort_by(|a, b| b.units.cmp(&a.units));
    ranked.truncate(TOP_N);

    SalesReport {
        total_revenue,
        total_units,
        average_sale,
        transactions: sales.len(),
        top_sellers: ranked,
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Key used to group sales in [`sales_breakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Genre,
    Author,
    /// Calendar month of the sale, `YYYY-MM`.
    Month,
}

/// Units and revenue for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BreakdownRow {
    pub key: String,
    pub units: i64,
    pub revenue: Money,
}

/// Sums units and revenue per genre, author or month.
///
/// Genre and author come from the current inventory. Sales of titles that
/// have since been removed are grouped under [`UNKNOWN_GROUP`]. Rows are
/// sorted by key.
pub fn sales_breakdown(sales: &[SaleRecord], books: &[Book], group_by: GroupBy) -> Vec<BreakdownRow> {
    let by_title: HashMap<&str, &Book> = books.iter().map(|b| (b.title(), b)).collect();

    let mut groups: BTreeMap<String, (i64, Money)> = BTreeMap::new();
    for sale in sales {
        let book = by_title.get(sale.title());
        let key = match group_by {
            GroupBy::Genre => book.map_or(UNKNOWN_GROUP, |b| b.genre()).to_string(),
            GroupBy::Author => book.map_or(UNKNOWN_GROUP, |b| b.author()).to_string(),
            GroupBy::Month => sale.timestamp().format("%Y-%m").to_string(),
        };
        let entry = groups.entry(key).or_insert((0, Money::zero()));
        entry.0 += sale.quantity_sold();
        entry.1 += sale.revenue();
    }

    groups
        .into_iter()
        .map(|(key, (units, revenue))| BreakdownRow { key, units, revenue })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
