//! # Sale Command
//!
//! `folio sell <title> <quantity>` records one sale at the current time.

use std::io::Write;

use folio_core::validation::parse_quantity;
use folio_core::{Ledger, TableStore};

use super::{write_json, Context};
use crate::error::CliError;

pub fn sell<S: TableStore, W: Write>(
    ledger: &mut Ledger<S>,
    ctx: &Context<'_>,
    out: &mut W,
    title: &str,
    quantity: &str,
) -> Result<(), CliError> {
    let quantity = parse_quantity(quantity)?;
    let sale = ledger.record_sale(title, quantity)?;

    if ctx.json {
        return write_json(out, &sale);
    }
    let left = ledger.book(sale.title()).map_or(0, |b| b.quantity());
    writeln!(
        out,
        "Sold {} x '{}' for {} ({} left)",
        sale.quantity_sold(),
        sale.title(),
        ctx.config.format_currency(sale.revenue()),
        left
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::commands::tests::{run, shop};
    use crate::error::ErrorCode;
    use crate::Command;

    fn sell(title: &str, quantity: &str) -> Command {
        Command::Sell {
            title: title.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn test_sell_prints_receipt_line() {
        let mut ledger = shop();
        let out = run(&mut ledger, sell("Dune", "3"), false).unwrap();
        assert_eq!(out, "Sold 3 x 'Dune' for $900.00 (7 left)\n");
        assert_eq!(ledger.sales().len(), 1);
    }

    #[test]
    fn test_sell_json() {
        let mut ledger = shop();
        let out = run(&mut ledger, sell("Emma", "2"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["title"], "Emma");
        assert_eq!(value["quantity_sold"], 2);
        assert_eq!(value["revenue"], 2398);
    }

    #[test]
    fn test_sell_errors() {
        let mut ledger = shop();
        let cases = [
            ("Dune", "11", ErrorCode::InsufficientStock),
            ("Ubik", "1", ErrorCode::NotFound),
            ("Dune", "0", ErrorCode::ValidationError),
            ("Dune", "three", ErrorCode::ValidationError),
        ];
        for (title, qty, code) in cases {
            let err = run(&mut ledger, sell(title, qty), false).unwrap_err();
            assert_eq!(err.code, code, "{title} {qty}");
        }
        assert!(ledger.sales().is_empty());
        assert_eq!(ledger.book("Dune").unwrap().quantity(), 10);
    }
}
