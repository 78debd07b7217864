//! # Commands Module
//!
//! One function per subcommand, grouped by what they touch.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Categories                                   │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐         │
//! │  │  book.rs        │  │  sale.rs        │  │  report.rs      │         │
//! │  │                 │  │                 │  │                 │         │
//! │  │  • add          │  │  • sell         │  │  • report       │         │
//! │  │  • update       │  │                 │  │  • analyze      │         │
//! │  │  • remove       │  │                 │  │  • breakdown    │         │
//! │  │  • list         │  │                 │  │                 │         │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are generic over the [`TableStore`] and the output writer, so
//! tests run them against a `MemoryStore` and a `Vec<u8>`.

pub mod book;
pub mod report;
pub mod sale;

use std::io::Write;

use serde::Serialize;

use folio_core::{Ledger, TableStore};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::Command;

/// Settings shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub config: &'a CliConfig,
    /// Print JSON instead of text.
    pub json: bool,
}

/// Runs one parsed command.
pub fn dispatch<S: TableStore, W: Write>(
    command: &Command,
    ledger: &mut Ledger<S>,
    ctx: &Context<'_>,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Command::Add {
            title,
            author,
            genre,
            price,
            quantity,
        } => {
            let new = book::NewBook {
                title,
                author,
                genre,
                price,
                quantity,
            };
            book::add(ledger, ctx, out, &new)
        }
        Command::Update {
            title,
            field,
            value,
        } => book::update(ledger, ctx, out, title, field, value),
        Command::Remove { title } => book::remove(ledger, ctx, out, title),
        Command::List => book::list(ledger, ctx, out),
        Command::Sell { title, quantity } => sale::sell(ledger, ctx, out, title, quantity),
        Command::Report => report::report(ledger, ctx, out),
        Command::Analyze => report::analyze(ledger, ctx, out),
        Command::Breakdown { by } => report::breakdown(ledger, ctx, out, (*by).into()),
    }
}

/// Writes `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<W: Write, T: Serialize + ?Sized>(
    out: &mut W,
    value: &T,
) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Writes rows as left-aligned columns, right-aligning the columns flagged
/// in `numeric`.
pub(crate) fn write_table<W: Write>(
    out: &mut W,
    headers: &[&str],
    numeric: &[bool],
    rows: &[Vec<String>],
) -> Result<(), CliError> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: &[String]| -> String {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .zip(numeric)
            .map(|((cell, width), right)| {
                if *right {
                    format!("{cell:>width$}")
                } else {
                    format!("{cell:<width$}")
                }
            })
            .collect();
        line.join("  ").trim_end().to_string()
    };

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    writeln!(out, "{}", render(&header))?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;
    for row in rows {
        writeln!(out, "{}", render(row))?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
