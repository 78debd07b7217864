//! # Book Commands
//!
//! `add`, `update`, `remove` and `list`.
//!
//! Prices and quantities arrive as raw strings and are parsed here, so a
//! typo is reported as a validation error (exit 1) rather than a usage
//! error.

use std::io::Write;

use tracing::debug;

use folio_core::validation::parse_quantity;
use folio_core::{BookUpdate, Ledger, Money, TableStore};

use super::{write_json, write_table, Context};
use crate::error::CliError;

/// Raw `add` arguments.
#[derive(Debug, Clone, Copy)]
pub struct NewBook<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub genre: &'a str,
    pub price: &'a str,
    pub quantity: &'a str,
}

pub fn add<S: TableStore, W: Write>(
    ledger: &mut Ledger<S>,
    ctx: &Context<'_>,
    out: &mut W,
    new: &NewBook<'_>,
) -> Result<(), CliError> {
    let price: Money = new.price.parse()?;
    let quantity = parse_quantity(new.quantity)?;

    let book = ledger.add_book(new.title, new.author, new.genre, price, quantity)?;

    if ctx.json {
        return write_json(out, &book);
    }
    writeln!(
        out,
        "Added '{}' by {} ({}), {} x {}",
        book.title(),
        book.author(),
        book.genre(),
        ctx.config.format_currency(book.price()),
        book.quantity()
    )?;
    Ok(())
}

pub fn update<S: TableStore, W: Write>(
    ledger: &mut Ledger<S>,
    ctx: &Context<'_>,
    out: &mut W,
    title: &str,
    field: &str,
    value: &str,
) -> Result<(), CliError> {
    let change = BookUpdate::parse(field, value)?;
    debug!(title, field = change.field(), "Parsed update");

    let book = ledger.update_book(title, change.clone())?;

    if ctx.json {
        return write_json(out, &book);
    }
    let shown = match change {
        BookUpdate::Author(_) => book.author().to_string(),
        BookUpdate::Genre(_) => book.genre().to_string(),
        BookUpdate::Price(_) => ctx.config.format_currency(book.price()),
        BookUpdate::Quantity(_) => book.quantity().to_string(),
    };
    writeln!(out, "Updated '{}': {} = {}", book.title(), change.field(), shown)?;
    Ok(())
}

pub fn remove<S: TableStore, W: Write>(
    ledger: &mut Ledger<S>,
    ctx: &Context<'_>,
    out: &mut W,
    title: &str,
) -> Result<(), CliError> {
    let book = ledger.remove_book(title)?;

    if ctx.json {
        return write_json(out, &book);
    }
    writeln!(out, "Removed '{}'", book.title())?;
    Ok(())
}

pub fn list<S: TableStore, W: Write>(
    ledger: &Ledger<S>,
    ctx: &Context<'_>,
    out: &mut W,
) -> Result<(), CliError> {
    let books = ledger.books();

    if ctx.json {
        return write_json(out, books);
    }
    if books.is_empty() {
        writeln!(out, "Inventory is empty.")?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = books
        .iter()
        .map(|b| {
            vec![
                b.title().to_string(),
                b.author().to_string(),
                b.genre().to_string(),
                ctx.config.format_currency(b.price()),
                b.quantity().to_string(),
            ]
        })
        .collect();
    write_table(
        out,
        &["Title", "Author", "Genre", "Price", "Qty"],
        &[false, false, false, true, true],
        &rows,
    )
}
