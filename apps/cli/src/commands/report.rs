//! # Report Commands
//!
//! `report`, `analyze` and `breakdown`. These only read the ledger.
//!
//! With `--json` each prints the report struct as-is, so a dashboard or
//! chart renderer can consume it; money fields are integer cents there.

use std::io::Write;

use serde::Serialize;

use folio_core::{ColumnStats, GroupBy, InventoryReport, Ledger, Money, SalesReport, TableStore};

use super::{write_json, write_table, Context};
use crate::error::CliError;

/// Combined payload of `folio report --json`.
#[derive(Debug, Serialize)]
struct FullReport {
    inventory: InventoryReport,
    sales: SalesReport,
}

pub fn report<S: TableStore, W: Write>(
    ledger: &Ledger<S>,
    ctx: &Context<'_>,
    out: &mut W,
) -> Result<(), CliError> {
    let inventory = ledger.inventory_report();
    let sales = ledger.sales_report();

    if ctx.json {
        return write_json(out, &FullReport { inventory, sales });
    }

    let money = |m: Money| ctx.config.format_currency(m);
    let average = |m: Option<Money>| m.map_or_else(|| "n/a".to_string(), money);

    writeln!(out, "Inventory")?;
    writeln!(out, "  Titles:         {}", inventory.unique_titles)?;
    writeln!(out, "  Total stock:    {}", inventory.total_stock)?;
    writeln!(out, "  Total value:    {}", money(inventory.total_value))?;
    writeln!(out, "  Average price:  {}", average(inventory.average_price))?;
    writeln!(out, "  Most expensive:")?;
    if inventory.top_by_price.is_empty() {
        writeln!(out, "    (none)")?;
    }
    for (rank, book) in inventory.top_by_price.iter().enumerate() {
        writeln!(
            out,
            "    {}. {} ({}) {}",
            rank + 1,
            book.title(),
            book.author(),
            money(book.price())
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Sales")?;
    writeln!(out, "  Transactions:   {}", sales.transactions)?;
    writeln!(out, "  Units sold:     {}", sales.total_units)?;
    writeln!(out, "  Total revenue:  {}", money(sales.total_revenue))?;
    writeln!(out, "  Average sale:   {}", average(sales.average_sale))?;
    writeln!(out, "  Best sellers:")?;
    if sales.top_sellers.is_empty() {
        writeln!(out, "    (none)")?;
    }
    for (rank, seller) in sales.top_sellers.iter().enumerate() {
        writeln!(out, "    {}. {} - {} sold", rank + 1, seller.title, seller.units)?;
    }
    Ok(())
}

pub fn analyze<S: TableStore, W: Write>(
    ledger: &Ledger<S>,
    ctx: &Context<'_>,
    out: &mut W,
) -> Result<(), CliError> {
    let analysis = ledger.analyze_sales();

    if ctx.json {
        return write_json(out, &analysis);
    }

    let (Some(revenue), Some(quantity)) = (&analysis.revenue, &analysis.quantity) else {
        writeln!(out, "No sales data to analyze.")?;
        return Ok(());
    };

    writeln!(out, "Sales analysis ({} transactions)", analysis.transactions)?;
    writeln!(out)?;
    let rows = vec![
        stats_row("Revenue", revenue, &ctx.config.currency_symbol),
        stats_row("Quantity", quantity, ""),
    ];
    write_table(
        out,
        &["", "Mean", "Median", "Std dev", "Min", "Max"],
        &[false, true, true, true, true, true],
        &rows,
    )?;

    writeln!(out)?;
    match analysis.growth_rate_pct {
        Some(pct) => writeln!(out, "Revenue trend (latest vs earliest sales): {pct:+.1}%")?,
        None => writeln!(out, "Revenue trend: n/a")?,
    }
    Ok(())
}

fn stats_row(label: &str, stats: &ColumnStats, unit: &str) -> Vec<String> {
    let cell = |v: f64| format!("{unit}{v:.2}");
    vec![
        label.to_string(),
        cell(stats.mean),
        cell(stats.median),
        stats.std_dev.map_or_else(|| "n/a".to_string(), cell),
        cell(stats.min),
        cell(stats.max),
    ]
}

pub fn breakdown<S: TableStore, W: Write>(
    ledger: &Ledger<S>,
    ctx: &Context<'_>,
    out: &mut W,
    group_by: GroupBy,
) -> Result<(), CliError> {
    let rows = ledger.sales_breakdown(group_by);

    if ctx.json {
        return write_json(out, &rows);
    }
    if rows.is_empty() {
        writeln!(out, "No sales recorded.")?;
        return Ok(());
    }

    let header = match group_by {
        GroupBy::Genre => "Genre",
        GroupBy::Author => "Author",
        GroupBy::Month => "Month",
    };
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.key.clone(),
                r.units.to_string(),
                ctx.config.format_currency(r.revenue),
            ]
        })
        .collect();
    write_table(out, &[header, "Units", "Revenue"], &[false, true, true], &cells)
}
